//! CLI module for mockgen
//!
//! ## Commands
//!
//! - `outline <file>` - Build the element tree and print an indented outline
//! - `type <text>` - Parse a type identifier
//! - `tokens <file>` - Dump lexer tokens (debug)
//! - `scan [project]` - Discover the project's Swift sources and count declarations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The command ran but reported syntax diagnostics.
    pub const DIAGNOSTICS: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Structural Swift parser for mock generation
#[derive(Parser, Debug)]
#[command(name = "mockgen")]
#[command(version = VERSION)]
#[command(about = "Structural Swift parser for mock generation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Maximum nesting depth for types, parameter clauses and type bodies
    #[arg(long = "max-depth", value_name = "N", global = true)]
    pub max_depth: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the element tree for a file and print an indented outline
    Outline {
        /// Swift source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Structure index (JSON) to build from instead of the grammars
        #[arg(long, value_name = "JSON")]
        index: Option<PathBuf>,
        /// Append byte ranges
        #[arg(long)]
        spans: bool,
        /// Only print declarations
        #[arg(long)]
        declarations: bool,
    },

    /// Parse a type identifier and print its canonical name and span
    Type {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Dump lexer tokens (debug)
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Discover the open project's Swift sources and print declaration counts
    Scan {
        /// Workspace, project or directory (default: $MOCKGEN_OPEN_PROJECT)
        #[arg(value_name = "PROJECT")]
        project: Option<String>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code != ExitCode::SUCCESS {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = commands::parse_config(cli.max_depth);
    match cli.command {
        Command::Outline {
            file,
            index,
            spans,
            declarations,
        } => commands::outline_file(&file, index.as_deref(), spans, declarations, config),
        Command::Type { text } => commands::parse_type_text(&text, config),
        Command::Tokens { file } => commands::dump_tokens(&file, config),
        Command::Scan { project, json } => commands::scan_project(project, json, config),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_outline() {
        let cli = Cli::try_parse_from(["mockgen", "outline", "A.swift", "--index", "A.json", "--spans"]).unwrap();
        if let Command::Outline { file, index, spans, .. } = cli.command {
            assert_eq!(file, PathBuf::from("A.swift"));
            assert_eq!(index, Some(PathBuf::from("A.json")));
            assert!(spans);
        } else {
            panic!("Expected Outline command");
        }
    }

    #[test]
    fn test_cli_parse_type() {
        let cli = Cli::try_parse_from(["mockgen", "type", "[String: Int]?"]).unwrap();
        assert!(matches!(cli.command, Command::Type { ref text } if text == "[String: Int]?"));
    }

    #[test]
    fn test_cli_parse_scan_without_project() {
        let cli = Cli::try_parse_from(["mockgen", "scan", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Scan { project: None, json: true }));
    }

    #[test]
    fn test_cli_parse_global_max_depth() {
        let cli = Cli::try_parse_from(["mockgen", "tokens", "A.swift", "--max-depth", "8"]).unwrap();
        assert_eq!(cli.max_depth, Some(8));
        assert!(matches!(cli.command, Command::Tokens { .. }));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["mockgen"]).is_err());
    }
}
