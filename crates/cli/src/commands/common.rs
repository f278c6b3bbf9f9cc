//! Config, schema, and fragment loading shared by every command.

use anyhow::{Context, Result};
use graphql_codegen::{generate_document, GenerateOptions, GeneratedDocument};
use graphql_config::{expand_patterns, find_config, load_config, ConfigError, DocgenConfig};
use graphql_hir::{extract_fragments, FragmentStructure, SchemaBuilder, SchemaStructure};
use std::fs;
use std::path::PathBuf;

/// Loaded config plus the directory its relative paths resolve against
pub struct CommandContext {
    pub config: DocgenConfig,
    pub base_dir: PathBuf,
}

impl CommandContext {
    /// Load the config for a command.
    ///
    /// Schema patterns given on the command line replace the configured
    /// ones and resolve against the working directory. With them, a config
    /// file is optional.
    pub fn load(config_path: Option<PathBuf>, schema_override: Vec<String>) -> Result<Self> {
        let current_dir = std::env::current_dir()?;

        let config_path = match config_path {
            Some(path) => Some(path),
            None => find_config(&current_dir).context("Failed to search for config")?,
        };

        let schema_override: Vec<String> = schema_override
            .into_iter()
            .map(|pattern| current_dir.join(pattern).to_string_lossy().into_owned())
            .collect();

        let Some(config_path) = config_path else {
            if schema_override.is_empty() {
                return Err(ConfigError::NotFound.into());
            }
            tracing::debug!("No config file, using schema patterns from the command line");
            return Ok(Self {
                config: DocgenConfig::with_schema(schema_override.into()),
                base_dir: current_dir,
            });
        };

        let mut config = load_config(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;
        if !schema_override.is_empty() {
            config.schema = schema_override.into();
        }

        let base_dir = config_path
            .parent()
            .context("Failed to get config directory")?
            .to_path_buf();

        Ok(Self { config, base_dir })
    }

    /// Read and merge every configured schema file
    #[tracing::instrument(skip(self), fields(base = %self.base_dir.display()))]
    pub fn load_schema(&self) -> Result<SchemaStructure> {
        let patterns = self.config.schema.paths();
        let files = expand_patterns(&self.base_dir, &patterns)?;
        if files.is_empty() {
            tracing::warn!(?patterns, "No schema files matched");
        }

        let mut builder = SchemaBuilder::default();
        for file in &files {
            let source = fs::read_to_string(file)
                .with_context(|| format!("Failed to read schema file {}", file.display()))?;
            builder.add_source(&file.display().to_string(), &source)?;
        }

        let schema = builder
            .build()
            .with_context(|| format!("Failed to load schema from {}", patterns.join(", ")))?;
        tracing::info!(files = files.len(), types = schema.len(), "Schema loaded");
        Ok(schema)
    }

    /// Fragments already defined in the configured documents
    #[tracing::instrument(skip(self))]
    pub fn load_fragments(&self) -> Result<Vec<FragmentStructure>> {
        let patterns = self.config.document_patterns();
        if patterns.is_empty() {
            return Ok(Vec::new());
        }

        let mut fragments = Vec::new();
        for file in expand_patterns(&self.base_dir, &patterns)? {
            let source = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read document {}", file.display()))?;
            fragments.extend(extract_fragments(&file.display().to_string(), &source)?);
        }

        tracing::debug!(count = fragments.len(), "Loaded existing fragments");
        Ok(fragments)
    }

    /// Generate the document for this context
    pub fn build_document(&self, no_fragments: bool) -> Result<GeneratedDocument> {
        let schema = self.load_schema()?;
        let options = GenerateOptions {
            fragments: self.config.fragments && !no_fragments,
            include_deprecated: self.config.include_deprecated,
            exclude: self.config.exclude.clone(),
            external_fragments: self.load_fragments()?,
        };
        Ok(generate_document(&schema, &options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_test_utils::fixtures::{CONNECTION_SCHEMA, MUTATION_SCHEMA};
    use graphql_hir::SchemaError;
    use std::path::Path;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_schema_resolves_against_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "schema/main.graphql", CONNECTION_SCHEMA);
        let config = write(
            temp_dir.path(),
            ".graphql-docgen.yml",
            "schema: schema/*.graphql\nfragments: false\n",
        );

        let ctx = CommandContext::load(Some(config), Vec::new()).unwrap();
        let document = ctx.build_document(false).unwrap();

        assert!(document.fragments.is_empty());
        let names: Vec<_> = document.operation_names().map(|(_, name)| name).collect();
        assert_eq!(names, vec!["user", "user_team", "user_team_issues"]);
    }

    #[test]
    fn test_documents_supply_existing_fragments() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "schema.graphql", MUTATION_SCHEMA);
        write(
            temp_dir.path(),
            "fragments/user.graphql",
            "fragment UserFields on User { id name }",
        );
        let config = write(
            temp_dir.path(),
            ".graphql-docgen.yml",
            "schema: schema.graphql\ndocuments: fragments/*.graphql\n",
        );

        let ctx = CommandContext::load(Some(config), Vec::new()).unwrap();
        let document = ctx.build_document(false).unwrap();

        assert!(document.fragments.iter().all(|f| f.name.as_ref() != "User"));
        assert!(document.to_string().contains("...UserFields"));
    }

    #[test]
    fn test_no_fragments_flag_overrides_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "schema.graphql", MUTATION_SCHEMA);
        let config = write(temp_dir.path(), ".graphql-docgen.json", r#"{"schema": "schema.graphql"}"#);

        let ctx = CommandContext::load(Some(config), Vec::new()).unwrap();
        assert!(ctx.config.fragments);
        assert!(ctx.build_document(true).unwrap().fragments.is_empty());
    }

    #[test]
    fn test_schema_override_replaces_configured_schema() {
        let temp_dir = tempfile::tempdir().unwrap();
        let other = write(temp_dir.path(), "other.graphql", MUTATION_SCHEMA);
        let config = write(
            temp_dir.path(),
            ".graphql-docgen.yml",
            "schema: missing.graphql\n",
        );

        let ctx = CommandContext::load(
            Some(config),
            vec![other.to_string_lossy().into_owned()],
        )
        .unwrap();
        let schema = ctx.load_schema().unwrap();
        assert!(schema.mutation_type().is_some());
    }

    #[test]
    fn test_unmatched_schema_is_a_schema_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write(
            temp_dir.path(),
            ".graphql-docgen.yml",
            "schema: missing/*.graphql\n",
        );

        let ctx = CommandContext::load(Some(config), Vec::new()).unwrap();
        let error = ctx.load_schema().unwrap_err();
        assert!(matches!(
            error.downcast_ref::<SchemaError>(),
            Some(SchemaError::MissingQueryType)
        ));
    }

    #[test]
    fn test_invalid_config_is_a_config_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write(
            temp_dir.path(),
            ".graphql-docgen.yml",
            "schema: schema.graphql\noutput: out.ts\n",
        );

        let error = CommandContext::load(Some(config), Vec::new())
            .err()
            .unwrap();
        assert!(matches!(
            error.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidOutputExtension(_))
        ));
    }
}
