//! 业务逻辑处理 (Update/Dispatch)
//!
//! 把 Action 翻译成对建议仓库的同步命令

use super::actions::Action;
use super::state::{App, AppMode, DraftField};
use crate::models::DraftPatch;

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                if self.mode == AppMode::Normal {
                    return true;
                }
            }
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::Upvote => self.upvote_selected(),
            Action::CycleSortKey => self.cycle_sort_key(),
            Action::StartCompose => self.start_compose(),

            Action::SwitchField => {
                if let AppMode::Composing(field) = self.mode {
                    self.mode = AppMode::Composing(field.other());
                }
            }
            Action::Cancel => self.cancel(),

            Action::Submit => match self.mode {
                AppMode::Composing(DraftField::Title) => {
                    self.mode = AppMode::Composing(DraftField::Description);
                }
                AppMode::Composing(DraftField::Description) => self.submit_suggestion(),
                AppMode::Normal => {}
            },

            Action::Input(c) => self.edit_draft(|value| value.push(c)),
            Action::DeleteChar => self.edit_draft(|value| {
                value.pop();
            }),
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.display_list.len() {
            self.selected_index += 1;
        }
    }

    // ============ 列表操作 ============

    /// 给选中的建议投票
    pub fn upvote_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.upvote(id);
            self.refresh_display_list();
        }
    }

    /// 切换排序字段
    pub fn cycle_sort_key(&mut self) {
        let next = self.store.sort_key().next();
        self.store.set_sort_key(next);
        self.refresh_display_list();
        self.message = Some(format!("Sorted by {}", next.label()));
    }

    // ============ 表单相关 ============

    /// 打开表单（保留之前未提交的草稿）
    pub fn start_compose(&mut self) {
        self.mode = AppMode::Composing(DraftField::Title);
        self.message = None;
    }

    /// 编辑当前焦点字段
    fn edit_draft(&mut self, edit: impl FnOnce(&mut String)) {
        let AppMode::Composing(field) = self.mode else {
            return;
        };

        let draft = self.store.draft();
        let patch = match field {
            DraftField::Title => {
                let mut title = draft.title.clone();
                edit(&mut title);
                DraftPatch::title(title)
            }
            DraftField::Description => {
                let mut description = draft.description.clone();
                edit(&mut description);
                DraftPatch::description(description)
            }
        };
        self.store.update_draft(patch);
    }

    /// 提交草稿；字段为空时表单保持打开
    pub fn submit_suggestion(&mut self) {
        if let Some(id) = self.store.submit_draft() {
            self.refresh_display_list();
            self.select_id(id);
            self.mode = AppMode::Normal;
            self.message = Some("Suggestion submitted".to_string());
        }
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.message = None;
    }
}
