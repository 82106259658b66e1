//! 回合状态
//!
//! 当前题目、NG 词与计时器集中在一个显式的状态对象中，
//! 所有处理函数都以 `&mut self` 操作它。

use rand::Rng;

use crate::error::{NoValidTopicError, SparseBanPoolWarning};
use crate::models::{Topic, TopicStore};
use crate::selector::{pick_ng_words, pick_topic};
use crate::timer::RoundTimer;

#[derive(Debug, Clone)]
pub struct RoundState {
    /// 当前题目在 TopicStore 中的下标
    pub current: Option<usize>,
    pub ng_words: Vec<String>,
    pub timer: RoundTimer,
    pub answer_revealed: bool,
    pub round_count: u32,
}

impl RoundState {
    pub fn new(timer: RoundTimer) -> Self {
        Self {
            current: None,
            ng_words: Vec::new(),
            timer,
            answer_revealed: false,
            round_count: 1,
        }
    }

    pub fn current_topic<'a>(&self, store: &'a TopicStore) -> Option<&'a Topic> {
        self.current.and_then(|i| store.get(i))
    }

    /// 抽取新题目：替换 NG 词，隐藏答案，重置计时器
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        store: &TopicStore,
        rng: &mut R,
    ) -> Result<Option<SparseBanPoolWarning>, NoValidTopicError> {
        let last_id = self.current_topic(store).map(|t| t.id.clone());
        let topic = pick_topic(&store.topics, last_id.as_deref(), rng).ok_or(NoValidTopicError)?;
        let pick = pick_ng_words(topic, rng);

        tracing::info!(topic = %topic.id, ng = ?pick.words, "topic drawn");

        self.current = store.position(&topic.id);
        self.ng_words = pick.words;
        self.answer_revealed = false;
        self.timer.reset();

        Ok(pick.warning)
    }

    /// 题目集合被替换后，旧下标失效
    pub fn clear(&mut self) {
        self.current = None;
        self.ng_words.clear();
        self.answer_revealed = false;
        self.timer.reset();
    }

    pub fn reveal_answer(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.answer_revealed = true;
        true
    }

    /// 回合数至少为 1
    pub fn set_round_count(&mut self, value: i64) {
        self.round_count = value.clamp(1, i64::from(u32::MAX)) as u32;
    }

    pub fn adjust_round_count(&mut self, delta: i64) {
        self.set_round_count(i64::from(self.round_count) + delta);
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(RoundTimer::default())
    }
}
