mod commands;
mod exit_code;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

pub use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "graphql-docgen")]
#[command(about = "Generate GraphQL fragments and operations from a schema", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to searching for .graphql-docgen.yml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the fragment and operation document
    Generate {
        /// Schema files or glob patterns, replacing the configured schema
        #[arg(short, long, value_name = "GLOB")]
        schema: Vec<String>,

        /// Output file (must end in .graphql); stdout when neither this nor the config sets one
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Skip per-type fragments and inline every selection
        #[arg(long)]
        no_fragments: bool,
    },

    /// List the operations that would be generated
    Operations {
        /// Schema files or glob patterns, replacing the configured schema
        #[arg(short, long, value_name = "GLOB")]
        schema: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
}

fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_info: !cli.quiet,
    };

    let result = match cli.command {
        Commands::Generate {
            schema,
            output,
            no_fragments,
        } => commands::generate::run(cli.config, schema, output, no_fragments, output_opts),
        Commands::Operations { schema, format } => {
            commands::operations::run(cli.config, schema, format)
        }
    };

    if let Err(error) = result {
        let code = ExitCode::for_error(&error);
        tracing::debug!(%code, "Command failed");
        eprintln!("{} {error:#}", "✗".red().bold());
        code.exit();
    }
}

/// Initialize tracing, filtered by `RUST_LOG` and written to stderr
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}

#[cfg(test)]
mod color_tests {
    use super::configure_colors;
    use colored::control::{self, SHOULD_COLORIZE};
    use std::sync::Mutex;

    // Serializes tests that touch env vars and the global color override
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn with_clean_env<F: FnOnce()>(f: F) {
        let _lock = TEST_MUTEX.lock().unwrap();

        let saved: Vec<_> = ["NO_COLOR", "CLICOLOR", "CLICOLOR_FORCE"]
            .into_iter()
            .map(|key| (key, std::env::var_os(key)))
            .collect();
        for (key, _) in &saved {
            std::env::remove_var(key);
        }
        control::unset_override();

        f();

        control::unset_override();
        for (key, value) in saved {
            if let Some(value) = value {
                std::env::set_var(key, value);
            }
        }
    }

    #[test]
    fn color_flag_forces_colors_on() {
        with_clean_env(|| {
            configure_colors(true, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn no_color_flag_forces_colors_off() {
        with_clean_env(|| {
            configure_colors(false, true);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn color_flag_overrides_no_color_env() {
        with_clean_env(|| {
            std::env::set_var("NO_COLOR", "1");
            configure_colors(true, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn clicolor_force_enables_colors() {
        with_clean_env(|| {
            std::env::set_var("CLICOLOR_FORCE", "1");
            configure_colors(false, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn clicolor_zero_disables_colors() {
        with_clean_env(|| {
            std::env::set_var("CLICOLOR", "0");
            configure_colors(false, false);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }
}

#[cfg(test)]
mod cli_tests {
    use super::{Cli, Commands, OutputFormat};
    use clap::Parser;

    #[test]
    fn generate_accepts_repeated_schema_globs() {
        let cli = Cli::try_parse_from([
            "graphql-docgen",
            "generate",
            "--schema",
            "a.graphql",
            "--schema",
            "b/*.graphql",
            "--no-fragments",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                schema,
                output,
                no_fragments,
            } => {
                assert_eq!(schema, vec!["a.graphql", "b/*.graphql"]);
                assert!(output.is_none());
                assert!(no_fragments);
            }
            Commands::Operations { .. } => panic!("expected generate"),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "graphql-docgen",
            "operations",
            "--format",
            "json",
            "--quiet",
            "--config",
            "docgen.yml",
        ])
        .unwrap();

        assert!(cli.quiet);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("docgen.yml")));
        assert!(matches!(
            cli.command,
            Commands::Operations {
                format: OutputFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn color_flags_conflict() {
        assert!(Cli::try_parse_from(["graphql-docgen", "--color", "--no-color", "generate"]).is_err());
    }
}
