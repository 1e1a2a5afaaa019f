//! 通用 UI 组件
//!
//! 表单弹窗、草稿输入框、状态徽章

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::models::Status;

const CURSOR: &str = "▏";

/// [组件] 表单弹窗：清空背景，底边显示操作提示，返回内部区域
pub fn render_form_dialog(frame: &mut Frame, area: Rect, title: &str, hint: &str) -> Rect {
    frame.render_widget(Clear, area);
    let dialog = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", hint),
            Style::default().fg(Color::Gray),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = dialog.inner(area);
    frame.render_widget(dialog, area);
    inner
}

/// [组件] 草稿字段输入框
///
/// 值为空时显示灰色占位文字；获得焦点时末尾带光标。
pub fn render_draft_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let text = match (value.is_empty(), focused) {
        (true, true) => Line::from(vec![
            Span::styled(CURSOR, Style::default().fg(Color::Yellow)),
            Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
        ]),
        (true, false) => Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        (false, true) => Line::from(vec![
            Span::raw(value.to_string()),
            Span::styled(CURSOR, Style::default().fg(Color::Yellow)),
        ]),
        (false, false) => Line::from(value.to_string()),
    };

    let border = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let field = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_style(border),
        );
    frame.render_widget(field, area);
}

/// [组件] 状态徽章
pub fn status_badge(status: Status) -> Span<'static> {
    let bg = match status {
        Status::New => Color::Blue,
        Status::InProgress => Color::Yellow,
        Status::Completed => Color::Green,
    };

    Span::styled(
        format!(" {} ", status.label()),
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )
}
