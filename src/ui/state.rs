//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::models::{Suggestion, SuggestionStore};

/// 应用状态
pub struct App {
    pub store: SuggestionStore,
    pub selected_index: usize,
    pub display_list: Vec<u32>, // 按当前排序排列的建议 ID
    pub mode: AppMode,
    pub message: Option<String>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Composing(DraftField),
}

/// 表单中获得焦点的字段
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftField {
    Title,
    Description,
}

impl DraftField {
    pub fn other(&self) -> Self {
        match self {
            DraftField::Title => DraftField::Description,
            DraftField::Description => DraftField::Title,
        }
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(store: SuggestionStore) -> Self {
        let mut app = Self {
            store,
            selected_index: 0,
            display_list: Vec::new(),
            mode: AppMode::Normal,
            message: None,
        };
        app.refresh_display_list();
        app
    }

    /// 刷新显示列表，选中项尽量跟随原来的 ID
    pub fn refresh_display_list(&mut self) {
        let previous = self.selected_id();
        self.display_list = self
            .store
            .sorted_suggestions()
            .iter()
            .map(|s| s.id)
            .collect();

        if let Some(index) = previous.and_then(|id| self.display_list.iter().position(|&x| x == id))
        {
            self.selected_index = index;
        } else if self.display_list.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.display_list.len() {
            self.selected_index = self.display_list.len() - 1;
        }
    }

    /// 选中指定 ID（不在列表中时保持不变）
    pub fn select_id(&mut self, id: u32) {
        if let Some(index) = self.display_list.iter().position(|&x| x == id) {
            self.selected_index = index;
        }
    }

    /// 获取当前选中的建议
    pub fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.selected_id().and_then(|id| self.store.get(id))
    }

    /// 获取当前选中的建议 ID
    pub fn selected_id(&self) -> Option<u32> {
        self.display_list.get(self.selected_index).copied()
    }
}
