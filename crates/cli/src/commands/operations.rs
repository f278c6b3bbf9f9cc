//! List the operations a generation run would produce

use crate::commands::common::CommandContext;
use crate::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use graphql_codegen::{GeneratedDocument, OperationKind};
use std::path::PathBuf;

#[tracing::instrument(skip_all)]
pub fn run(config_path: Option<PathBuf>, schema: Vec<String>, format: OutputFormat) -> Result<()> {
    let ctx = CommandContext::load(config_path, schema)?;
    let document = ctx.build_document(false)?;

    match format {
        OutputFormat::Human => display_human_format(&document),
        OutputFormat::Json => display_json_format(&document)?,
    }

    Ok(())
}

fn display_human_format(document: &GeneratedDocument) {
    if document.operations.is_empty() {
        println!("{}", "No operations generated.".yellow());
        return;
    }

    for (kind, name) in document.operation_names() {
        let kind = match kind {
            OperationKind::Query => kind.keyword().blue(),
            OperationKind::Mutation => kind.keyword().magenta(),
        };
        println!("{kind:<8} {name}");
    }

    let queries = document
        .operation_names()
        .filter(|(kind, _)| *kind == OperationKind::Query)
        .count();
    println!();
    println!(
        "{} queries, {} mutations, {} fragments",
        queries.to_string().bold(),
        (document.operations.len() - queries).to_string().bold(),
        document.fragments.len().to_string().bold()
    );
}

fn display_json_format(document: &GeneratedDocument) -> Result<()> {
    let operations: Vec<serde_json::Value> = document
        .operation_names()
        .map(|(kind, name)| serde_json::json!({ "kind": kind.keyword(), "name": name }))
        .collect();
    let fragments: Vec<&str> = document
        .fragments
        .iter()
        .map(|fragment| fragment.name.as_ref())
        .collect();

    let output = serde_json::json!({
        "operations": operations,
        "fragments": fragments,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
