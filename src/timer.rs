//! 回合倒计时状态机
//!
//! Idle / Running / Paused 三态。时间由调用方显式传入，倒计时由主循环的
//! 协作式 tick 驱动：每次 tick 用截止时间与当前时间比较，重新计算剩余秒数。
//! `deadline` 是唯一的驱动句柄，只在 Running 时为 `Some`。

use std::time::{Duration, Instant};

pub const DEFAULT_DURATION_SECS: u32 = 60;
pub const DEFAULT_WARNING_SECS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// 一次 tick 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// 显示的秒数未变化
    Unchanged,
    /// 显示的秒数变为新值
    Changed(u32),
    /// 倒计时结束，已回到 Idle
    Expired,
}

/// 各按钮是否可用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerControls {
    pub start: bool,
    pub stop: bool,
    pub reset: bool,
}

#[derive(Debug, Clone)]
pub struct RoundTimer {
    state: TimerState,
    remaining_secs: u32,
    deadline: Option<Instant>,
    duration_secs: u32,
    warning_secs: u32,
}

impl RoundTimer {
    pub fn new(duration_secs: u32, warning_secs: u32) -> Self {
        let duration_secs = duration_secs.max(1);
        Self {
            state: TimerState::Idle,
            remaining_secs: duration_secs,
            deadline: None,
            duration_secs,
            warning_secs,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_warning(&self) -> bool {
        self.remaining_secs <= self.warning_secs
    }

    /// 两位数显示，例如 "04"
    pub fn display(&self) -> String {
        format!("{:02}", self.remaining_secs)
    }

    /// Idle/Paused -> Running
    pub fn start(&mut self, now: Instant) {
        if self.state == TimerState::Running {
            return;
        }
        if self.remaining_secs == 0 {
            self.remaining_secs = self.duration_secs;
        }
        self.deadline = Some(now + Duration::from_secs(u64::from(self.remaining_secs)));
        self.state = TimerState::Running;
        tracing::debug!(remaining = self.remaining_secs, "timer started");
    }

    /// Running -> Paused，剩余秒数冻结在最后一次计算的值
    pub fn stop(&mut self) {
        if self.state != TimerState::Running {
            return;
        }
        self.deadline = None;
        self.state = TimerState::Paused;
        tracing::debug!(remaining = self.remaining_secs, "timer paused");
    }

    /// 任意状态 -> Idle，恢复默认时长
    pub fn reset(&mut self) {
        self.deadline = None;
        self.state = TimerState::Idle;
        self.remaining_secs = self.duration_secs;
    }

    /// 空格键：运行中则暂停，否则开始
    pub fn toggle(&mut self, now: Instant) {
        if self.is_running() {
            self.stop();
        } else {
            self.start(now);
        }
    }

    pub fn tick(&mut self, now: Instant) -> Tick {
        let Some(deadline) = self.deadline else {
            return Tick::Unchanged;
        };

        let left = deadline.saturating_duration_since(now);
        let secs = left.as_millis().div_ceil(1000) as u32;

        if left.is_zero() {
            self.deadline = None;
            self.state = TimerState::Idle;
            self.remaining_secs = 0;
            tracing::info!("round time is up");
            return Tick::Expired;
        }

        if secs != self.remaining_secs {
            self.remaining_secs = secs;
            Tick::Changed(secs)
        } else {
            Tick::Unchanged
        }
    }

    pub fn controls(&self) -> TimerControls {
        let running = self.is_running();
        let pristine = self.state == TimerState::Idle && self.remaining_secs == self.duration_secs;
        TimerControls {
            start: !running,
            stop: running,
            reset: !pristine,
        }
    }
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS, DEFAULT_WARNING_SECS)
    }
}
