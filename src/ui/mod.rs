//! UI 模块
//!
//! 采用 MVI (Model-View-Intent) 架构：
//! - Model (state.rs): App 结构体，持有题目集合、回合状态与弹窗
//! - View (view/): 纯函数，将 State 映射为终端画面
//! - Intent (actions.rs, input.rs): 按键转化为语义化 Action
//! - Update (logic.rs): dispatch 与 tick

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;

// Re-export for convenience
pub use input::handle_key_event;
pub use state::App;
pub use view::render;
