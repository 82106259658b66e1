//! 题目显示投影
//!
//! 纯函数：把 Topic 与抽中的 NG 词映射为要显示的文本和列表。

use crate::models::{FULL_BAN_POOL, NG_WORD_COUNT, Topic};

pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub text: String,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicView {
    pub title: String,
    pub category: String,
    pub grade: String,
    pub difficulty: String,
    pub notes: String,
    pub aliases: String,
    pub ban_list: Vec<ListEntry>,
    pub picked: Vec<ListEntry>,
}

impl TopicView {
    pub fn project(topic: &Topic, ng_words: &[String]) -> Self {
        Self {
            title: topic.topic.clone(),
            category: or_placeholder(topic.category.as_deref()),
            grade: or_placeholder(topic.grade_range.as_deref()),
            difficulty: topic
                .difficulty
                .as_ref()
                .map(|d| d.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            notes: match topic.notes.as_deref() {
                Some(notes) if !notes.is_empty() && notes != PLACEHOLDER => notes.to_string(),
                _ => String::new(),
            },
            aliases: aliases_line(topic),
            ban_list: padded(&topic.bans, FULL_BAN_POOL, false),
            picked: padded(ng_words, NG_WORD_COUNT, true),
        }
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// 别名与读音，都没有时为空
fn aliases_line(topic: &Topic) -> String {
    let mut parts = Vec::new();
    if let Some(reading) = topic.reading.as_deref().filter(|r| !r.is_empty()) {
        parts.push(format!("よみ: {}", reading));
    }
    if let Some(alias) = topic.alias.as_ref().filter(|a| !a.is_empty()) {
        parts.push(format!("別名: {}", alias.join("、")));
    }
    parts.join("  ")
}

/// 不足 expected 个时用占位符补齐，占位符不强调
fn padded(items: &[String], expected: usize, emphasize: bool) -> Vec<ListEntry> {
    let filler = expected.saturating_sub(items.len());
    items
        .iter()
        .map(|item| ListEntry {
            text: item.clone(),
            emphasized: emphasize,
        })
        .chain((0..filler).map(|_| ListEntry {
            text: PLACEHOLDER.to_string(),
            emphasized: false,
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::topic;

    fn texts(entries: &[ListEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_missing_metadata_uses_placeholder() {
        let t = topic("1", &["a", "b", "c", "d", "e", "f"]);
        let view = TopicView::project(&t, &[]);

        assert_eq!(view.title, "topic-1");
        assert_eq!(view.category, "—");
        assert_eq!(view.grade, "—");
        assert_eq!(view.difficulty, "—");
        assert_eq!(view.notes, "");
        assert_eq!(view.aliases, "");
    }

    #[test]
    fn test_metadata_rendered_as_provided() {
        let mut t = topic("1", &["a", "b", "c", "d", "e", "f"]);
        t.category = Some("食べ物".to_string());
        t.grade_range = Some("小3-小6".to_string());
        t.difficulty = Some(serde_json::Number::from(2));
        t.notes = Some("季節".to_string());
        t.reading = Some("りんご".to_string());
        t.alias = Some(vec!["アップル".to_string()]);

        let view = TopicView::project(&t, &[]);
        assert_eq!(view.category, "食べ物");
        assert_eq!(view.grade, "小3-小6");
        assert_eq!(view.difficulty, "2");
        assert_eq!(view.notes, "季節");
        assert_eq!(view.aliases, "よみ: りんご  別名: アップル");
    }

    #[test]
    fn test_dash_notes_hidden() {
        let mut t = topic("1", &[]);
        t.notes = Some("—".to_string());
        t.category = Some(String::new());
        let view = TopicView::project(&t, &[]);
        assert_eq!(view.notes, "");
        assert_eq!(view.category, "—");
    }

    #[test]
    fn test_lists_padded_and_emphasized() {
        let t = topic("1", &["a", "b", "c", "d"]);
        let picked = vec!["b".to_string(), "d".to_string(), "a".to_string()];
        let view = TopicView::project(&t, &picked);

        assert_eq!(texts(&view.ban_list), vec!["a", "b", "c", "d", "—", "—"]);
        assert!(view.ban_list.iter().all(|e| !e.emphasized));
        assert_eq!(texts(&view.picked), vec!["b", "d", "a"]);
        assert!(view.picked.iter().all(|e| e.emphasized));
    }

    #[test]
    fn test_empty_pick_is_all_placeholders() {
        let t = topic("1", &["a", "b"]);
        let view = TopicView::project(&t, &[]);
        assert_eq!(texts(&view.picked), vec!["—", "—", "—"]);
        assert!(view.picked.iter().all(|e| !e.emphasized));
    }

    #[test]
    fn test_projection_is_idempotent() {
        let t = topic("1", &["a", "b", "c"]);
        let picked = vec!["a".to_string()];
        assert_eq!(
            TopicView::project(&t, &picked),
            TopicView::project(&t, &picked)
        );
    }
}
