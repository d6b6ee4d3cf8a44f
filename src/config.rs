//! Command-line configuration for the `gofront` driver.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Lex and parse a Go-style source file, writing token tables and JSON reports.
#[derive(Debug, Clone, Parser)]
#[command(name = "gofront", version, about)]
pub struct Config {
    /// Source file to analyse
    #[arg(default_value = "go/product.go")]
    pub input: PathBuf,

    /// Directory that receives the token tables and JSON files
    #[arg(short, long, default_value = "results")]
    pub out_dir: PathBuf,

    /// Skip cst.json, symbol_table.json and imports.json
    #[arg(long)]
    pub no_json: bool,

    /// Open the interactive token explorer after writing reports
    #[arg(long)]
    pub tui: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "gofront=warn",
            1 => "gofront=info",
            2 => "gofront=debug",
            _ => "gofront=trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["gofront"]).unwrap();
        assert_eq!(config.input, PathBuf::from("go/product.go"));
        assert_eq!(config.out_dir, PathBuf::from("results"));
        assert!(!config.no_json);
        assert!(!config.tui);
        assert_eq!(config.log_directive(), "gofront=warn");
    }

    #[test]
    fn test_flags() {
        let config =
            Config::try_parse_from(["gofront", "main.go", "-o", "out", "--no-json", "-vv"]).unwrap();
        assert_eq!(config.input, PathBuf::from("main.go"));
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert!(config.no_json);
        assert_eq!(config.log_directive(), "gofront=debug");

        let config = Config::try_parse_from(["gofront", "-vvvv"]).unwrap();
        assert_eq!(config.log_directive(), "gofront=trace");
    }
}
