//! Main TUI application state and logic

use crate::parser::lexer::LexOutput;
use crate::parser::parse::ParseError;
use crate::parser::symbols::{ImportEntry, SymbolTable};
use crate::parser::token::Token;
use crate::ui::panes::{self, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Diagnostics,
    Symbols,
}

impl FocusedPane {
    /// Move focus clockwise: source -> diagnostics -> tokens -> symbols
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Symbols,
            FocusedPane::Symbols => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    pub source_code: String,
    pub lexed: LexOutput,
    pub symbols: SymbolTable,
    pub imports: Vec<ImportEntry>,
    pub parse_error: Option<ParseError>,

    /// Index into the master token list
    pub cursor: usize,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub tokens_scroll: usize,
    pub diagnostics_scroll: usize,
    pub symbols_scroll: usize,

    pub should_quit: bool,
    pub status_message: String,
}

impl App {
    pub fn new(
        source_code: String,
        lexed: LexOutput,
        symbols: SymbolTable,
        imports: Vec<ImportEntry>,
        parse_error: Option<ParseError>,
    ) -> Self {
        let status_message = match &parse_error {
            Some(_) => "Parsing failed, see diagnostics".to_string(),
            None if lexed.has_diagnostics() => {
                format!("Parsed with {} lexical diagnostic(s)", lexed.diagnostics.len())
            }
            None => String::from("Ready!"),
        };
        App {
            source_code,
            lexed,
            symbols,
            imports,
            parse_error,
            cursor: 0,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            tokens_scroll: 0,
            diagnostics_scroll: 0,
            symbols_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.lexed.tokens.get(self.cursor)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Diagnostics (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Tokens (top) | Symbols (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let current = self.lexed.tokens.get(self.cursor);

        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            &self.lexed.tokens,
            current,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_diagnostics_pane(
            frame,
            left_rows[1],
            &self.lexed.diagnostics,
            self.parse_error.as_ref(),
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.lexed.tokens,
            self.cursor,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        panes::render_symbols_pane(
            frame,
            right_rows[1],
            &self.symbols,
            &self.imports,
            self.focused_pane == FocusedPane::Symbols,
            &mut self.symbols_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.cursor,
            self.lexed.tokens.len(),
            self.parse_error.is_some(),
        );
    }

    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).map_or(1, |d| d as usize);
                let stepped = self.step_forward(n);
                self.status_message = format!("Stepped forward {stepped} token(s)");
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                if self.cursor == 0 {
                    self.status_message = "Already at the first token".to_string();
                } else {
                    self.cursor -= 1;
                    self.describe_current();
                }
            }
            KeyCode::Right => {
                if self.step_forward(1) == 0 {
                    self.status_message = "Already at the last token".to_string();
                } else {
                    self.describe_current();
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tokens => self.tokens_scroll = self.tokens_scroll.saturating_sub(1),
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_sub(1)
                }
                FocusedPane::Symbols => self.symbols_scroll = self.symbols_scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tokens => self.tokens_scroll = self.tokens_scroll.saturating_add(1),
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_add(1)
                }
                FocusedPane::Symbols => self.symbols_scroll = self.symbols_scroll.saturating_add(1),
            },
            KeyCode::Enter => {
                self.cursor = self.lexed.tokens.len().saturating_sub(1);
                self.status_message = "Jumped to last token".to_string();
            }
            KeyCode::Backspace => {
                self.cursor = 0;
                self.status_message = "Jumped to first token".to_string();
            }
            _ => {}
        }
    }

    /// Advance up to `n` tokens, returning how many were taken.
    fn step_forward(&mut self, n: usize) -> usize {
        let last = self.lexed.tokens.len().saturating_sub(1);
        let target = (self.cursor + n).min(last);
        let stepped = target - self.cursor;
        self.cursor = target;
        stepped
    }

    fn describe_current(&mut self) {
        let description = self
            .current_token()
            .map(|token| format!("{} '{}' at {}", token.kind, token.text, token.location()));
        if let Some(description) = description {
            self.status_message = description;
        }
    }
}
