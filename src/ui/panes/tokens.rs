//! Token table pane

use crate::parser::token::Token;
use crate::ui::panes::{clamp_scroll, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

/// Keep `cursor` inside the window `[offset, offset + visible)`.
fn follow_cursor(offset: &mut usize, cursor: usize, visible: usize) {
    if cursor < *offset {
        *offset = cursor;
    } else if cursor >= *offset + visible {
        *offset = cursor + 1 - visible;
    }
}

/// Render the master token list with the cursor row highlighted
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    cursor: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tokens ", is_focused);

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // One row goes to the header.
    let visible = visible_height(area).saturating_sub(1).max(1);
    follow_cursor(scroll_offset, cursor, visible);
    clamp_scroll(scroll_offset, tokens.len(), visible);

    let rows: Vec<Row> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible)
        .map(|(idx, token)| {
            let style = if idx == cursor {
                Style::default()
                    .bg(DEFAULT_THEME.current_token_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            Row::new(vec![
                Cell::from(token.text.replace('\n', "⏎")),
                Cell::from(token.kind.name()).style(Style::default().fg(DEFAULT_THEME.type_name)),
                Cell::from(token.line.to_string()),
                Cell::from(token.column.to_string()),
                Cell::from(token.id.clone()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["Lexeme", "Token type", "Row", "Col", "Id"]).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Min(12),
        Constraint::Length(18),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(6),
    ];

    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
