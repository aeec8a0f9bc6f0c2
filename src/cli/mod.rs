//! CLI module for KawigiEdit
//!
//! This module provides the command-line interface to the harness engine.
//!
//! ## Commands
//!
//! - `languages` - List the supported target languages
//! - `skeleton` - Expand the skeleton template for a problem
//! - `generate` - Emit the test harness (optionally inserted into a source file)
//! - `parse` - Recover test cases from a source file containing a harness
//! - `compare` - Compare two canonical values with the harness equality rules
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

use crate::version::KAWIGI_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
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
    /// Create a new CLI error with a message and exit code.
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

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Test-harness generator and parser for competitive-programming solutions
#[derive(Parser, Debug)]
#[command(name = "kawigi")]
#[command(version = KAWIGI_VERSION)]
#[command(about = "Generate and recover KawigiEdit test harnesses", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Preferences file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported target languages
    Languages,

    /// Print the expanded class skeleton and caret offset
    Skeleton {
        /// Problem description (JSON)
        #[arg(long, value_name = "FILE")]
        problem: PathBuf,
        /// Target language
        #[arg(long, value_name = "LANG")]
        lang: String,
    },

    /// Print the test harness, inserted into a source file when one is given
    Generate {
        /// Problem description (JSON)
        #[arg(long, value_name = "FILE")]
        problem: PathBuf,
        /// Target language
        #[arg(long, value_name = "LANG")]
        lang: String,
        /// Source file containing the testing-code tag
        #[arg(long, value_name = "FILE")]
        source: Option<PathBuf>,
    },

    /// Recover test cases from a source file and print them as JSON
    Parse {
        /// Problem description (JSON)
        #[arg(long, value_name = "FILE")]
        problem: PathBuf,
        /// Target language
        #[arg(long, value_name = "LANG")]
        lang: String,
        /// Source file containing a generated harness
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        /// Also print the source with the harness replaced by the testing-code tag
        #[arg(long)]
        strip: bool,
    },

    /// Compare an expected and an actual canonical value
    Compare {
        /// Value type (e.g. `double`, `String[]`)
        #[arg(long = "type", value_name = "TYPE")]
        ty: String,
        /// Expected value
        #[arg(value_name = "EXPECTED")]
        expected: String,
        /// Actual value
        #[arg(value_name = "ACTUAL")]
        actual: String,
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
            if exit_code.0 != 0 {
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
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let settings = commands::load_settings(cli.config.as_deref())?;
    match cli.command {
        Command::Languages => commands::list_languages(),
        Command::Skeleton { problem, lang } => commands::print_skeleton(&problem, &lang, &settings),
        Command::Generate { problem, lang, source } => {
            commands::generate(&problem, &lang, source.as_deref(), &settings)
        }
        Command::Parse {
            problem,
            lang,
            source,
            strip,
        } => commands::parse(&problem, &lang, &source, strip, &settings),
        Command::Compare { ty, expected, actual } => commands::compare(&ty, &expected, &actual),
    }
}

// ============================================================================
// Tests
// ============================================================================
