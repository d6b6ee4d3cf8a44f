//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text coloured by token class, with the current token marked
//! - [`tokens`]: Master token table scrolled around the cursor
//! - [`diagnostics`]: Lexical diagnostics and the parse error, if any
//! - [`symbols`]: Scopes, struct types and imports
//! - [`status`]: Status bar with keybindings and cursor position
//!
//! Each pane module exports a primary `render_*_pane()` function. Pane state
//! lives in [`crate::ui::App`]; renderers only clamp the scroll offsets they
//! are handed.

pub mod diagnostics;
pub mod source;
pub mod status;
pub mod symbols;
pub mod tokens;

pub use diagnostics::render_diagnostics_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use symbols::render_symbols_pane;
pub use tokens::render_tokens_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block whose border colour follows focus.
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane, at least one.
pub(crate) fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp `offset` so the last page is still full.
pub(crate) fn clamp_scroll(offset: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}
