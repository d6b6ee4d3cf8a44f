//! Source pane rendering with token-class highlighting
//!
//! Colours come from the lexer's own token stream rather than a separate
//! highlighter, so what the pane shows is exactly what was tokenized. Text
//! between tokens (whitespace, comments, unrecognized input) is dimmed.
//!
//! The line holding the current token keeps a fixed visual row while
//! stepping; ↑/↓ move that row.

use crate::parser::token::{Token, TokenClass};
use crate::ui::panes::{pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

fn class_style(class: TokenClass) -> Style {
    match class {
        TokenClass::Keyword => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenClass::Operator => Style::default().fg(DEFAULT_THEME.operator),
        TokenClass::Variable => Style::default().fg(DEFAULT_THEME.name),
        TokenClass::Constant => Style::default().fg(DEFAULT_THEME.constant),
        TokenClass::Punctuation => Style::default().fg(DEFAULT_THEME.punctuation),
        TokenClass::Skip => Style::default().fg(DEFAULT_THEME.comment),
    }
}

/// Colour one source line using the tokens that start on it.
fn highlight_line<'a>(line: &str, tokens: &[&Token], current: Option<&Token>) -> Line<'a> {
    let chars: Vec<char> = line.chars().collect();
    let gap_style = Style::default().fg(DEFAULT_THEME.comment);
    let mut spans = Vec::new();
    let mut cursor = 0;

    for token in tokens {
        let start = token.column.saturating_sub(1).min(chars.len());
        if start < cursor {
            continue;
        }
        if start > cursor {
            spans.push(Span::styled(chars[cursor..start].iter().collect::<String>(), gap_style));
        }

        // Multi-line tokens (raw strings) are coloured up to the line end.
        let width = token.text.chars().take_while(|c| *c != '\n').count();
        let end = (start + width).min(chars.len());

        let mut style = class_style(token.kind.class());
        if current.is_some_and(|c| std::ptr::eq(c, *token)) {
            style = style
                .bg(DEFAULT_THEME.current_token_bg)
                .add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(chars[start..end].iter().collect::<String>(), style));
        cursor = end;
    }

    if cursor < chars.len() {
        spans.push(Span::styled(chars[cursor..].iter().collect::<String>(), gap_style));
    }

    Line::from(spans)
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    tokens: &[Token],
    current: Option<&Token>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = pane_block(" Source ", is_focused);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let current_line = current.map_or(0, |t| t.line);
    let visible_height = visible_height(area);

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);
        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let on_line: Vec<&Token> = tokens.iter().filter(|t| t.line == line_num).collect();
            let mut content = highlight_line(line, &on_line, current);

            let num_style = if is_current {
                for span in &mut content.spans {
                    span.style = Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .patch(span.style);
                }
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{line_num:4} "), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn span_texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_tokens_and_gaps() {
        let source = "x := 1 // note";
        let out = tokenize(source);
        let tokens: Vec<&Token> = out.tokens.iter().collect();
        let line = highlight_line(source, &tokens, None);
        assert_eq!(span_texts(&line), vec!["x", " ", ":=", " ", "1", " // note"]);
    }

    #[test]
    fn test_current_token_is_marked() {
        let source = "a + b";
        let out = tokenize(source);
        let tokens: Vec<&Token> = out.tokens.iter().collect();
        let line = highlight_line(source, &tokens, Some(&out.tokens[2]));
        assert_eq!(line.spans[4].style.bg, Some(DEFAULT_THEME.current_token_bg));
        assert_eq!(line.spans[0].style.bg, None);
    }

    #[test]
    fn test_multibyte_columns() {
        let source = "s := \"é\"; t";
        let out = tokenize(source);
        let tokens: Vec<&Token> = out.tokens.iter().collect();
        let line = highlight_line(source, &tokens, None);
        assert_eq!(line.spans.last().map(|s| s.content.to_string()), Some("t".to_string()));
    }
}
