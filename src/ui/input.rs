//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char(' ') | KeyCode::Char('u') => Some(Action::Upvote),
            KeyCode::Char('s') => Some(Action::CycleSortKey),
            KeyCode::Char('a') => Some(Action::StartCompose),
            KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
        AppMode::Composing(_) => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchField),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match get_action(&app.mode, key) {
        Some(action) => {
            tracing::trace!(?action, "dispatch");
            app.dispatch(action)
        }
        None => false,
    }
}
