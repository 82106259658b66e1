//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action。输入框获得焦点时所有字符都作为输入，
//! 快捷键（空格、R）不生效。

use std::io;
use std::time::Instant;

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('d') | KeyCode::Enter => Some(Action::Draw),
            KeyCode::Char('n') => Some(Action::Redraw),
            KeyCode::Char('c') => Some(Action::Copy),
            KeyCode::Char('a') => Some(Action::RevealAnswer),
            KeyCode::Char('l') => Some(Action::ReloadTopics),
            KeyCode::Char(' ') => Some(Action::ToggleTimer),
            KeyCode::Char('s') => Some(Action::StartTimer),
            KeyCode::Char('x') => Some(Action::StopTimer),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::ResetTimer),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::IncreaseRounds),
            KeyCode::Char('-') => Some(Action::DecreaseRounds),
            KeyCode::Char('e') => Some(Action::StartEditRounds),
            _ => None,
        },
        AppMode::EditingRounds => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::Dialog(_) => match key {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
    }
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyCode, now: Instant) -> io::Result<bool> {
    if let Some(action) = get_action(&app.mode, key) {
        Ok(app.dispatch(action, now))
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::Dialog;

    #[test]
    fn test_shortcuts_in_normal_mode() {
        let mode = AppMode::Normal;
        assert_eq!(
            get_action(&mode, KeyCode::Char(' ')),
            Some(Action::ToggleTimer)
        );
        assert_eq!(
            get_action(&mode, KeyCode::Char('R')),
            Some(Action::ResetTimer)
        );
        assert_eq!(get_action(&mode, KeyCode::Enter), Some(Action::Draw));
    }

    #[test]
    fn test_shortcuts_ignored_while_editing() {
        let mode = AppMode::EditingRounds;
        assert_eq!(
            get_action(&mode, KeyCode::Char(' ')),
            Some(Action::Input(' '))
        );
        assert_eq!(
            get_action(&mode, KeyCode::Char('r')),
            Some(Action::Input('r'))
        );
        assert_eq!(get_action(&mode, KeyCode::Enter), Some(Action::Submit));
    }

    #[test]
    fn test_dialog_only_closes() {
        let mode = AppMode::Dialog(Dialog::Error("x".to_string()));
        assert_eq!(get_action(&mode, KeyCode::Char(' ')), None);
        assert_eq!(get_action(&mode, KeyCode::Esc), Some(Action::Cancel));
    }
}
