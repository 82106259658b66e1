//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use std::time::{Duration, Instant};

use chrono::Local;

use super::actions::Action;
use super::state::{App, AppMode, DataStatus, Dialog};
use crate::clipboard::{CopyOutcome, format_copy_text};
use crate::storage::load_topics;
use crate::timer::Tick;

/// 复制成功提示的显示时长
pub const COPY_FEEDBACK: Duration = Duration::from_millis(1600);

pub const MSG_LOAD_FAILED: &str =
    "トピックデータの読み込みに失敗しました。ファイルを確認して [l] で再読み込みしてください。";
pub const MSG_NO_VALID_TOPIC: &str = "有効なお題が見つかりませんでした。";
pub const MSG_SPARSE_POOL: &str = "NG候補が6語未満のお題があります。データを確認してください。";
pub const MSG_MANUAL_COPY: &str =
    "コピーが自動で許可されていません。以下の内容を選択してコピーしてください。";

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action, now: Instant) -> bool {
        match action {
            Action::Quit => return true,

            Action::Draw | Action::Redraw => self.draw_topic(),
            Action::Copy => self.copy_round_text(now),
            Action::RevealAnswer => self.reveal_answer(),
            Action::ReloadTopics => self.load_topics(),

            Action::ToggleTimer => {
                if self.round.timer.is_running() {
                    self.pause_timer();
                } else {
                    self.round.timer.start(now);
                }
            }
            Action::StartTimer => {
                if self.round.timer.controls().start {
                    self.round.timer.start(now);
                }
            }
            Action::StopTimer => {
                if self.round.timer.controls().stop {
                    self.pause_timer();
                }
            }
            Action::ResetTimer => self.round.timer.reset(),

            Action::IncreaseRounds => self.round.adjust_round_count(1),
            Action::DecreaseRounds => self.round.adjust_round_count(-1),
            Action::StartEditRounds => self.start_edit_rounds(),

            Action::Cancel => self.cancel(),

            Action::Submit => match &self.mode {
                AppMode::EditingRounds => self.confirm_edit_rounds(),
                AppMode::Dialog(_) => self.close_dialog(),
                AppMode::Normal => {}
            },

            Action::Input(c) => {
                if self.mode == AppMode::EditingRounds {
                    self.input_buffer.push(c);
                }
            }

            Action::DeleteChar => {
                if self.mode == AppMode::EditingRounds {
                    self.input_buffer.pop();
                }
            }
        }
        false
    }

    /// 主循环每次迭代调用，返回是否需要重绘
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = match self.round.timer.tick(now) {
            Tick::Unchanged => false,
            Tick::Changed(secs) => {
                tracing::trace!(secs, "timer display changed");
                true
            }
            Tick::Expired => {
                self.message = Some("時間切れ！".to_string());
                if let Err(e) = self.chime.play() {
                    tracing::warn!("chime failed: {}", e);
                }
                true
            }
        };

        if let Some(until) = self.copy_feedback_until {
            if now >= until {
                self.copy_feedback_until = None;
                changed = true;
            }
        }

        changed
    }

    // ============ 题目相关 ============

    /// 加载（或重新加载）题目文件
    pub fn load_topics(&mut self) {
        self.status = DataStatus::Loading;
        self.round.clear();
        self.copy_feedback_until = None;

        match load_topics(&self.config.topics_path, self.config.sparse_pool) {
            Ok(store) => {
                self.status = DataStatus::Loaded(store.valid_count());
                self.loaded_at = Some(Local::now());
                self.store = Some(store);
                self.message = Some(self.status.label());
            }
            Err(e) => {
                tracing::error!(path = %self.config.topics_path.display(), "{}", e);
                self.status = DataStatus::Failed;
                self.store = None;
                self.show_error(MSG_LOAD_FAILED);
            }
        }
    }

    /// 抽取新题目
    pub fn draw_topic(&mut self) {
        let Some(store) = &self.store else {
            return;
        };

        match self.round.draw(store, &mut self.rng) {
            Ok(warning) => {
                self.copy_feedback_until = None;
                self.message = Some(format!("第 {} ラウンド", self.round.round_count));
                if warning.is_some() {
                    self.show_error(MSG_SPARSE_POOL);
                }
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.show_error(MSG_NO_VALID_TOPIC);
            }
        }
    }

    pub fn reveal_answer(&mut self) {
        self.round.reveal_answer();
    }

    /// 复制消息文本
    pub fn copy_round_text(&mut self, now: Instant) {
        if !self.can_copy() {
            return;
        }
        let Some(topic) = self.current_topic() else {
            return;
        };
        let text = format_copy_text(&self.config.copy_template, topic, &self.round.ng_words);

        match self.clipboard.attempt_copy(&text) {
            CopyOutcome::Copied(via) => {
                tracing::debug!(via, "copy feedback shown");
                self.copy_feedback_until = Some(now + COPY_FEEDBACK);
                self.message = Some("コピーしました".to_string());
            }
            CopyOutcome::Manual(text) => {
                self.message = Some("自動コピーできませんでした".to_string());
                self.mode = AppMode::Dialog(Dialog::ManualCopy(text));
            }
        }
    }

    // ============ 回合数相关 ============

    fn pause_timer(&mut self) {
        self.round.timer.stop();
        self.message = Some(format!(
            "一時停止（残り {} 秒）",
            self.round.timer.remaining_secs()
        ));
    }

    pub fn start_edit_rounds(&mut self) {
        self.mode = AppMode::EditingRounds;
        self.input_buffer = self.round.round_count.to_string();
    }

    /// 非数字按 1 处理
    pub fn confirm_edit_rounds(&mut self) {
        let value = self.input_buffer.trim().parse::<i64>().unwrap_or(1);
        self.round.set_round_count(value);
        self.mode = AppMode::Normal;
        self.input_buffer.clear();
    }

    // ============ 通用操作 ============

    pub fn show_error(&mut self, message: &str) {
        self.mode = AppMode::Dialog(Dialog::Error(message.to_string()));
    }

    pub fn close_dialog(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.input_buffer.clear();
    }
}
