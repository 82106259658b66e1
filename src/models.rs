use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 题目有资格被抽中所需的最少 NG 候补数
pub const MIN_BANS: usize = 3;
/// 完整的 NG 候补池大小
pub const FULL_BAN_POOL: usize = 6;
/// 每轮抽取的 NG 词数量
pub const NG_WORD_COUNT: usize = 3;

/// 题目（お題）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub topic: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub grade_range: Option<String>,
    #[serde(default)]
    pub difficulty: Option<serde_json::Number>,
    #[serde(default, deserialize_with = "lenient_bans")]
    pub bans: Vec<String>,
    #[serde(default)]
    pub alias: Option<Vec<String>>,
    #[serde(default)]
    pub reading: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `bans` 不是数组（如 null）时视为空列表，数组中的数字和布尔值转为文本，
/// 其余元素丢弃。这样单条坏数据只会让该题目失去资格，不会让整个文件加载失败。
fn lenient_bans<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let bans = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(bans)
}

impl Topic {
    pub fn is_eligible(&self) -> bool {
        self.bans.len() >= MIN_BANS
    }

    pub fn has_full_pool(&self) -> bool {
        self.bans.len() >= FULL_BAN_POOL
    }

    /// 去除重复的 NG 候补，保留首次出现的顺序
    fn dedup_bans(&mut self) {
        let mut seen = Vec::with_capacity(self.bans.len());
        self.bans.retain(|ban| {
            if seen.contains(ban) {
                false
            } else {
                seen.push(ban.clone());
                true
            }
        });
    }
}

/// NG 候补不足 6 个的题目如何处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SparsePoolPolicy {
    /// 保留题目，抽题时给出警告
    #[default]
    Warn,
    /// 加载时直接剔除
    Exclude,
}

/// 已加载的题目集合
#[derive(Debug, Clone, Default)]
pub struct TopicStore {
    pub topics: Vec<Topic>,
}

impl TopicStore {
    pub fn new(topics: Vec<Topic>, policy: SparsePoolPolicy) -> Self {
        let topics = topics
            .into_iter()
            .map(|mut topic| {
                topic.dedup_bans();
                topic
            })
            .filter(|topic| match policy {
                SparsePoolPolicy::Warn => true,
                SparsePoolPolicy::Exclude => topic.has_full_pool(),
            })
            .collect();
        Self { topics }
    }

    /// 满足最少 NG 候补数的题目
    pub fn valid(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter().filter(|t| t.is_eligible())
    }

    pub fn valid_count(&self) -> usize {
        self.valid().count()
    }

    pub fn get(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.topics.iter().position(|t| t.id == id)
    }
}

#[cfg(test)]
pub fn topic(id: &str, bans: &[&str]) -> Topic {
    Topic {
        id: id.to_string(),
        topic: format!("topic-{}", id),
        category: None,
        grade_range: None,
        difficulty: None,
        bans: bans.iter().map(|b| b.to_string()).collect(),
        alias: None,
        reading: None,
        notes: None,
    }
}
