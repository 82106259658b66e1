//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::time::Instant;

use chrono::{DateTime, Local};
use rand::rngs::StdRng;

use crate::chime::Chime;
use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::models::{Topic, TopicStore};
use crate::round::RoundState;
use crate::timer::RoundTimer;

/// 应用状态
pub struct App {
    pub config: Config,
    pub store: Option<TopicStore>,
    pub status: DataStatus,
    pub loaded_at: Option<DateTime<Local>>,
    pub round: RoundState,
    pub mode: AppMode,
    pub input_buffer: String,
    pub message: Option<String>,
    pub copy_feedback_until: Option<Instant>,
    pub clipboard: Clipboard,
    pub chime: Box<dyn Chime>,
    pub rng: StdRng,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    EditingRounds,
    Dialog(Dialog),
}

/// 弹窗类型
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Error(String),
    ManualCopy(String),
}

/// 题目数据加载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStatus {
    Loading,
    Loaded(usize),
    Failed,
}

impl DataStatus {
    pub fn label(&self) -> String {
        match self {
            DataStatus::Loading => "読み込み中…".to_string(),
            DataStatus::Loaded(count) => format!("お題 {} 件", count),
            DataStatus::Failed => "読み込み失敗".to_string(),
        }
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(config: Config, clipboard: Clipboard, chime: Box<dyn Chime>, rng: StdRng) -> Self {
        let timer = RoundTimer::new(config.round_seconds, config.warning_seconds);
        Self {
            config,
            store: None,
            status: DataStatus::Loading,
            loaded_at: None,
            round: RoundState::new(timer),
            mode: AppMode::Normal,
            input_buffer: String::new(),
            message: None,
            copy_feedback_until: None,
            clipboard,
            chime,
            rng,
        }
    }

    /// 获取当前题目
    pub fn current_topic(&self) -> Option<&Topic> {
        self.store
            .as_ref()
            .and_then(|store| self.round.current_topic(store))
    }

    pub fn can_draw(&self) -> bool {
        self.store.is_some()
    }

    pub fn can_copy(&self) -> bool {
        self.current_topic().is_some() && self.copy_feedback_until.is_none()
    }

    pub fn can_reveal(&self) -> bool {
        self.current_topic().is_some()
    }
}
