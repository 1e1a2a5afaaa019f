//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, AppMode, DraftField};
use crate::models::Suggestion;
use components::{render_draft_field, render_form_dialog, status_badge};
use layouts::centered_rect;

const CARD_INDENT: &str = "        ";

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // 标题
            Constraint::Min(10),   // 建议列表
            Constraint::Length(6), // 评论
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_suggestions(frame, app, chunks[1]);
    render_details(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);

    if let AppMode::Composing(field) = app.mode {
        render_compose_dialog(frame, app, field);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Feature Suggestions",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Help us improve by suggesting new features or voting on existing ones.",
            Style::default().fg(Color::Gray),
        )),
    ];
    let header = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// 一张建议卡片
fn suggestion_card(suggestion: &Suggestion) -> ListItem<'static> {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("▲ {:>4}  ", suggestion.votes),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                suggestion.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("{}{}", CARD_INDENT, suggestion.description),
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::raw(CARD_INDENT),
            status_badge(suggestion.status),
            Span::styled(
                format!("  {} comments", suggestion.comments.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::default(),
    ];
    ListItem::new(lines)
}

fn render_suggestions(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .display_list
        .iter()
        .filter_map(|id| app.store.get(*id))
        .map(suggestion_card)
        .collect();

    let title = format!(
        "Current Suggestions ({}) | Sort: {}",
        app.store.len(),
        app.store.sort_key().label()
    );

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Yellow));

    let mut state = ListState::default();
    if !app.display_list.is_empty() {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = match app.selected_suggestion() {
        Some(s) if s.comments.is_empty() => vec![Line::from("No comments yet")],
        Some(s) => s
            .comments
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::styled(
                        format!("{}: ", c.author),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(c.text.clone()),
                ])
            })
            .collect(),
        None => vec![Line::from("No suggestions yet, press 'a' to add the first one")],
    };

    let details = Paragraph::new(lines)
        .block(Block::default().title("Comments").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(details, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        AppMode::Normal => "[a] suggest  [space/u] upvote  [s] sort  [j/k] navigate  [q] quit",
        AppMode::Composing(DraftField::Title) => "[Enter] next  [Tab] switch field  [Esc] close",
        AppMode::Composing(DraftField::Description) => {
            "[Enter] submit  [Tab] switch field  [Esc] close"
        }
    };

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{}  |  {}", help_text, message),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_compose_dialog(frame: &mut Frame, app: &App, field: DraftField) {
    let hint = match field {
        DraftField::Title => "Enter: continue  Tab: switch  Esc: close",
        DraftField::Description => "Enter: submit  Tab: switch  Esc: close",
    };
    let area = centered_rect(60, 50, frame.area());
    let inner = render_form_dialog(frame, area, "Suggest a New Feature", hint);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(inner);

    let draft = app.store.draft();
    render_draft_field(
        frame,
        chunks[0],
        "Title",
        &draft.title,
        "Feature title",
        field == DraftField::Title,
    );
    render_draft_field(
        frame,
        chunks[1],
        "Description",
        &draft.description,
        "Describe your feature suggestion...",
        field == DraftField::Description,
    );
}
