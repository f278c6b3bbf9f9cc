//! Write the generated fragment and operation document

use crate::commands::common::CommandContext;
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_config::validate_output;
use std::fs;
use std::path::PathBuf;

#[tracing::instrument(skip_all, fields(output = ?output, no_fragments = no_fragments))]
pub fn run(
    config_path: Option<PathBuf>,
    schema: Vec<String>,
    output: Option<PathBuf>,
    no_fragments: bool,
    output_opts: OutputOptions,
) -> Result<()> {
    let start_time = std::time::Instant::now();

    if let Some(output) = &output {
        validate_output(output)?;
    }

    let ctx = CommandContext::load(config_path, schema)?;
    let output = output.or_else(|| ctx.config.output.as_ref().map(|path| ctx.base_dir.join(path)));

    let document = ctx.build_document(no_fragments)?;

    let Some(output) = output else {
        print!("{document}");
        return Ok(());
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&output, document.to_string())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if output_opts.show_info {
        eprintln!(
            "{} Generated {} fragments and {} operations in {}",
            "✓".green().bold(),
            document.fragments.len().to_string().bold(),
            document.operations.len().to_string().bold(),
            format!("{:.2}s", start_time.elapsed().as_secs_f64()).dimmed()
        );
        eprintln!("  {} {}", "→".dimmed(), output.display().to_string().cyan());
    }

    Ok(())
}
