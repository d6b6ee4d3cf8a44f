// gofront: lexer, CST parser and token explorer for a Go subset

use std::fs;
use std::io;
use std::process;

use clap::Parser as _;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gofront::config::Config;
use gofront::parser::lexer;
use gofront::parser::parse::Parser;
use gofront::report;
use gofront::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    // The explorer owns the terminal, so logging stays off while it runs.
    if !config.tui {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(config.log_directive())),
            )
            .with_ansi(false)
            .with_writer(io::stderr)
            .init();
    }

    let source = match fs::read_to_string(&config.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", config.input.display(), e);
            process::exit(1);
        }
    };
    info!(input = %config.input.display(), bytes = source.len(), "analysing");

    let lexed = lexer::tokenize(&source);
    for diagnostic in &lexed.diagnostics {
        eprintln!("{diagnostic}");
    }

    let mut parser = Parser::new(lexed.tokens.clone());
    let parse_error = match parser.parse() {
        Ok(program) => {
            info!(declarations = program.children.len(), "parsed");
            if !config.no_json {
                report::write_parse_artifacts(
                    &config.out_dir,
                    &program,
                    parser.symbol_table(),
                    parser.imports(),
                )?;
            }
            None
        }
        Err(e) => {
            eprintln!("Parsing error: {e}");
            let current = parser.current_token().map_or("EOF", |t| t.text.as_str());
            eprintln!("Current token: {current} at pos {}", parser.position());
            Some(e)
        }
    };

    report::write_token_tables(&config.out_dir, &lexed)?;

    let failed = parse_error.is_some();
    if config.tui {
        let app = App::new(
            source,
            lexed,
            parser.symbol_table().clone(),
            parser.imports().to_vec(),
            parse_error,
        );
        run_explorer(app)?;
    }

    if failed {
        process::exit(1);
    }
    Ok(())
}

fn run_explorer(mut app: App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
