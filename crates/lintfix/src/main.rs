//! Binary entry point for the lintfix CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Fix trees and print the fixed sources
//! lintfix fix --config lintfix.json A.json B.json
//!
//! # Write fixed sources to a directory and emit a JSON report
//! lintfix fix --config lintfix.json --out-dir fixed --format json A.json
//!
//! # List registered rules
//! lintfix rules
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use lintfix::cli::{render_fix_text, render_rules_text, run_fix, FixOptions};
use lintfix_core::error::{LintError, OutputErrorCode};
use lintfix_core::output::{emit_response, ErrorResponse, RulesResponse};
use lintfix_rules::RuleRegistry;

// ============================================================================
// CLI Structure
// ============================================================================

/// Apply style rules to type-attributed syntax trees.
#[derive(Parser, Debug)]
#[command(name = "lintfix", version, about = "Apply style rules to syntax trees")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable text (default).
    #[default]
    Text,
    /// Full JSON response.
    Json,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the configured rules over each tree.
    Fix {
        /// Rule configuration file.
        #[arg(long)]
        config: PathBuf,
        /// Write fixed sources to this directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
        /// Compilation units in JSON tree form.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List registered rules.
    Rules {
        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level);

    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            let error_code = OutputErrorCode::from(&err);
            let _ = emit_response(&ErrorResponse::new(&err), &mut io::stdout());
            let _ = io::stdout().flush();
            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<ExitCode, LintError> {
    let registry = RuleRegistry::with_builtin_rules();
    match cli.command {
        Command::Fix {
            config,
            out_dir,
            format,
            files,
        } => execute_fix(
            &registry,
            FixOptions {
                config,
                files,
                out_dir,
            },
            format,
        ),
        Command::Rules { format } => execute_rules(&registry, format),
    }
}

// ============================================================================
// Command Executors
// ============================================================================

fn execute_fix(
    registry: &RuleRegistry,
    options: FixOptions,
    format: Format,
) -> Result<ExitCode, LintError> {
    let response = run_fix(&options, registry)?;

    let mut stdout = io::stdout().lock();
    match format {
        Format::Text => render_fix_text(&response, &mut stdout),
        Format::Json => emit_response(&response, &mut stdout),
    }
    .map_err(|e| LintError::internal(e.to_string()))?;
    let _ = stdout.flush();

    Ok(match response.first_error_code() {
        Some(code) => ExitCode::from(code),
        None => ExitCode::SUCCESS,
    })
}

fn execute_rules(registry: &RuleRegistry, format: Format) -> Result<ExitCode, LintError> {
    let mut stdout = io::stdout().lock();
    match format {
        Format::Text => render_rules_text(registry, &mut stdout),
        Format::Json => {
            let names = registry.names().map(str::to_string).collect();
            emit_response(&RulesResponse::new(names), &mut stdout)
        }
    }
    .map_err(|e| LintError::internal(e.to_string()))?;
    let _ = stdout.flush();
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod cli_parsing {
        use super::*;

        #[test]
        fn parse_fix() {
            let args = [
                "lintfix",
                "fix",
                "--config",
                "lintfix.json",
                "--format",
                "json",
                "A.json",
                "B.json",
            ];
            let cli = Cli::try_parse_from(args).unwrap();
            match cli.command {
                Command::Fix {
                    config,
                    out_dir,
                    format,
                    files,
                } => {
                    assert_eq!(config, PathBuf::from("lintfix.json"));
                    assert_eq!(out_dir, None);
                    assert_eq!(format, Format::Json);
                    assert_eq!(files, vec![PathBuf::from("A.json"), PathBuf::from("B.json")]);
                }
                other => panic!("unexpected command {other:?}"),
            }
        }

        #[test]
        fn parse_fix_requires_files() {
            let args = ["lintfix", "fix", "--config", "lintfix.json"];
            assert!(Cli::try_parse_from(args).is_err());
        }

        #[test]
        fn parse_fix_requires_config() {
            let args = ["lintfix", "fix", "A.json"];
            assert!(Cli::try_parse_from(args).is_err());
        }

        #[test]
        fn parse_out_dir() {
            let args = ["lintfix", "fix", "--config", "c.json", "--out-dir", "fixed", "A.json"];
            let cli = Cli::try_parse_from(args).unwrap();
            assert!(matches!(
                cli.command,
                Command::Fix { out_dir: Some(ref dir), .. } if dir == &PathBuf::from("fixed")
            ));
        }

        #[test]
        fn parse_rules_defaults_to_text() {
            let cli = Cli::try_parse_from(["lintfix", "rules"]).unwrap();
            assert!(matches!(cli.command, Command::Rules { format: Format::Text }));
            assert!(matches!(cli.global.log_level, LogLevel::Warn));
        }

        #[test]
        fn parse_log_level_debug() {
            let args = ["lintfix", "--log-level", "debug", "rules"];
            let cli = Cli::try_parse_from(args).unwrap();
            assert!(matches!(cli.global.log_level, LogLevel::Debug));
        }
    }

    mod log_level {
        use super::*;

        #[test]
        fn converts_to_tracing_level() {
            assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
            assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
            assert_eq!(LogLevel::Info.to_tracing_level(), tracing::Level::INFO);
            assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
            assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
        }
    }
}
