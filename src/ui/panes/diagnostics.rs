//! Diagnostics pane: lexical problems followed by the parse outcome

use crate::parser::diagnostic::LexDiagnostic;
use crate::parser::parse::ParseError;
use crate::ui::panes::{clamp_scroll, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding},
    Frame,
};

/// Lines shown in the pane, most severe last.
fn diagnostic_lines<'a>(diagnostics: &[LexDiagnostic], parse_error: Option<&ParseError>) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = diagnostics
        .iter()
        .map(|d| {
            let style = if d.is_bracket_problem() {
                Style::default().fg(DEFAULT_THEME.secondary)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            Line::from(vec![
                Span::styled("lex ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(d.to_string(), style),
            ])
        })
        .collect();

    match parse_error {
        Some(err) => lines.push(Line::from(vec![
            Span::styled(
                "parse ",
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(err.to_string(), Style::default().fg(DEFAULT_THEME.error)),
        ])),
        None => lines.push(Line::from(Span::styled(
            "parse ok",
            Style::default().fg(DEFAULT_THEME.success),
        ))),
    }

    lines
}

/// Render the diagnostics pane
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    diagnostics: &[LexDiagnostic],
    parse_error: Option<&ParseError>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Diagnostics ({}) ", diagnostics.len() + usize::from(parse_error.is_some()));
    let block = pane_block(&title, is_focused).padding(Padding::new(1, 0, 0, 0));

    let lines = diagnostic_lines(diagnostics, parse_error);
    let visible = visible_height(area);
    clamp_scroll(scroll_offset, lines.len(), visible);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible)
        .map(ListItem::new)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
