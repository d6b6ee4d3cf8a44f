//! Symbol table pane: scopes with their variables, struct types, imports

use crate::parser::symbols::{ImportEntry, SymbolTable};
use crate::ui::panes::{clamp_scroll, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

fn heading<'a>(text: String) -> Line<'a> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ))
}

/// `name: type @pos` with the type coloured
fn entry<'a>(name: &str, type_name: &str, pos: Option<usize>) -> Line<'a> {
    let mut spans = vec![
        Span::styled(format!("  {name}: "), Style::default().fg(DEFAULT_THEME.fg)),
        Span::styled(type_name.to_string(), Style::default().fg(DEFAULT_THEME.type_name)),
    ];
    if let Some(pos) = pos {
        spans.push(Span::styled(format!(" @{pos}"), Style::default().fg(DEFAULT_THEME.comment)));
    }
    Line::from(spans)
}

fn symbol_lines<'a>(symbols: &SymbolTable, imports: &[ImportEntry]) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    for (scope_name, scope) in &symbols.scopes {
        lines.push(heading(format!("scope {scope_name}")));
        for (name, var) in &scope.variables {
            lines.push(entry(name, &var.type_name, Some(var.pos)));
        }
    }

    if !symbols.types.is_empty() {
        lines.push(heading("types".to_string()));
        for (type_name, ty) in &symbols.types {
            lines.push(Line::from(Span::styled(
                format!(" {type_name}"),
                Style::default().fg(DEFAULT_THEME.type_name),
            )));
            for (field, field_type) in &ty.fields {
                lines.push(entry(field, field_type, None));
            }
        }
    }

    if !imports.is_empty() {
        lines.push(heading("imports".to_string()));
        for import in imports {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", import.name()), Style::default().fg(DEFAULT_THEME.constant)),
                Span::styled(format!(" @{}", import.package.pos), Style::default().fg(DEFAULT_THEME.comment)),
            ]));
        }
    }

    lines
}

/// Render the symbols pane
pub fn render_symbols_pane(
    frame: &mut Frame,
    area: Rect,
    symbols: &SymbolTable,
    imports: &[ImportEntry],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Symbols ", is_focused);
    let lines = symbol_lines(symbols, imports);
    clamp_scroll(scroll_offset, lines.len(), visible_height(area));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(*scroll_offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}
