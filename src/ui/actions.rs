//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,

    // 题目
    Draw,
    Redraw,
    Copy,
    RevealAnswer,
    ReloadTopics,

    // 计时器
    ToggleTimer,
    StartTimer,
    StopTimer,
    ResetTimer,

    // 回合数
    IncreaseRounds,
    DecreaseRounds,
    StartEditRounds,

    // 表单/通用交互
    Cancel,      // Esc
    Submit,      // Enter
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}
