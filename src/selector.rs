//! 抽题逻辑
//!
//! 随机抽取题目（避免与上一题重复）以及从 NG 候补中抽取 NG 词。

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::SparseBanPoolWarning;
use crate::models::{FULL_BAN_POOL, MIN_BANS, NG_WORD_COUNT, Topic};

/// NG 词抽取结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NgPick {
    pub words: Vec<String>,
    pub warning: Option<SparseBanPoolWarning>,
}

/// 抽取一个有效题目
///
/// 有效题目少于 2 个时允许重复；否则保证不与 `last_id` 相同。
pub fn pick_topic<'a, R: Rng + ?Sized>(
    topics: &'a [Topic],
    last_id: Option<&str>,
    rng: &mut R,
) -> Option<&'a Topic> {
    let valid: Vec<&Topic> = topics.iter().filter(|t| t.is_eligible()).collect();

    match valid.len() {
        0 => None,
        1 => Some(valid[0]),
        _ => {
            let fresh: Vec<&Topic> = valid
                .iter()
                .copied()
                .filter(|t| Some(t.id.as_str()) != last_id)
                .collect();
            // 所有候选 id 都与上一题相同（数据 id 重复）时退回全体
            let pool = if fresh.is_empty() { &valid } else { &fresh };
            pool.choose(rng).copied()
        }
    }
}

/// 从题目的 NG 候补中随机抽取 3 个
pub fn pick_ng_words<R: Rng + ?Sized>(topic: &Topic, rng: &mut R) -> NgPick {
    let bans = &topic.bans;
    if bans.len() < MIN_BANS {
        return NgPick::default();
    }

    let warning = if bans.len() < FULL_BAN_POOL {
        tracing::warn!(topic = %topic.id, pool = bans.len(), "NG candidate pool below 6");
        Some(SparseBanPoolWarning {
            topic_id: topic.id.clone(),
            pool_size: bans.len(),
        })
    } else {
        None
    };

    let mut shuffled = bans.clone();
    shuffled.shuffle(rng);
    shuffled.truncate(NG_WORD_COUNT);

    NgPick {
        words: shuffled,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::topic;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pick_topic_skips_short_ban_lists() {
        let topics = vec![
            topic("short", &["a", "b"]),
            topic("ok1", &["a", "b", "c"]),
            topic("ok2", &["a", "b", "c", "d", "e", "f"]),
        ];
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let picked = pick_topic(&topics, None, &mut rng).unwrap();
            assert_ne!(picked.id, "short");
        }
    }

    #[test]
    fn test_pick_topic_none_when_nothing_valid() {
        let topics = vec![topic("a", &["x", "y"]), topic("b", &[])];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_topic(&topics, None, &mut rng).is_none());
    }

    #[test]
    fn test_pick_topic_single_candidate_repeats() {
        let topics = vec![topic("only", &["a", "b", "c"]), topic("bad", &["a"])];
        let mut rng = StdRng::seed_from_u64(3);

        let picked = pick_topic(&topics, Some("only"), &mut rng).unwrap();
        assert_eq!(picked.id, "only");
    }

    #[test]
    fn test_pick_topic_never_repeats_previous() {
        let topics = vec![
            topic("a", &["1", "2", "3"]),
            topic("b", &["1", "2", "3"]),
            topic("c", &["1", "2", "3"]),
        ];
        let mut rng = StdRng::seed_from_u64(42);

        let mut last: Option<String> = None;
        for _ in 0..500 {
            let picked = pick_topic(&topics, last.as_deref(), &mut rng).unwrap();
            assert_ne!(Some(picked.id.clone()), last);
            last = Some(picked.id.clone());
        }
    }

    #[test]
    fn test_pick_topic_reaches_every_candidate() {
        let topics = vec![
            topic("a", &["1", "2", "3"]),
            topic("b", &["1", "2", "3"]),
            topic("c", &["1", "2", "3"]),
        ];
        let mut rng = StdRng::seed_from_u64(9);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_topic(&topics, None, &mut rng).unwrap().id.clone());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_pick_ng_words_three_distinct_from_pool() {
        let t = topic("t", &["a", "b", "c", "d", "e", "f"]);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let pick = pick_ng_words(&t, &mut rng);
            assert_eq!(pick.words.len(), 3);
            assert!(pick.warning.is_none());
            for word in &pick.words {
                assert!(t.bans.contains(word));
            }
            let mut unique = pick.words.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_pick_ng_words_sparse_pool_warns_but_proceeds() {
        let t = topic("sparse", &["a", "b", "c", "d"]);
        let mut rng = StdRng::seed_from_u64(5);

        let pick = pick_ng_words(&t, &mut rng);
        assert_eq!(pick.words.len(), 3);
        assert_eq!(
            pick.warning,
            Some(SparseBanPoolWarning {
                topic_id: "sparse".to_string(),
                pool_size: 4,
            })
        );
    }

    #[test]
    fn test_pick_ng_words_degenerate_pool_is_empty() {
        let t = topic("tiny", &["a", "b"]);
        let mut rng = StdRng::seed_from_u64(5);

        let pick = pick_ng_words(&t, &mut rng);
        assert!(pick.words.is_empty());
        assert!(pick.warning.is_none());
    }
}
