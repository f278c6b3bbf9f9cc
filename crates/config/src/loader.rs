use crate::{ConfigError, DocgenConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".graphql-docgen.yml",
    ".graphql-docgen.yaml",
    ".graphql-docgen.json",
];

/// Find a config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config from the specified path.
/// The format is detected from the file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<DocgenConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        schema_patterns = config.schema.paths().len(),
        fragments = config.fragments,
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<DocgenConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let config = match extension {
        "yml" | "yaml" => {
            tracing::trace!("Parsing as YAML");
            parse_yaml(contents, path)?
        }
        "json" => {
            tracing::trace!("Parsing as JSON");
            parse_json(contents, path)?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    tracing::debug!("Validating config");
    validate_config(&config, path)?;

    Ok(config)
}

/// Parse YAML configuration
fn parse_yaml(contents: &str, path: &Path) -> Result<DocgenConfig> {
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

/// Parse JSON configuration
fn parse_json(contents: &str, path: &Path) -> Result<DocgenConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Validate the loaded configuration
fn validate_config(config: &DocgenConfig, path: &Path) -> Result<()> {
    let schema_paths = config.schema.paths();
    if schema_paths.is_empty() {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: "Schema configuration is empty".to_string(),
        });
    }
    if schema_paths.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: "Schema configuration has an empty path".to_string(),
        });
    }

    if config.document_patterns().iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: "Documents configuration has an empty pattern".to_string(),
        });
    }

    if let Some(output) = &config.output {
        validate_output(output)?;
    }

    tracing::debug!("Config validation passed");
    Ok(())
}

/// Check that `output` names a `.graphql` file
pub fn validate_output(output: &Path) -> Result<()> {
    if output.extension().and_then(|ext| ext.to_str()) == Some("graphql") {
        Ok(())
    } else {
        Err(ConfigError::InvalidOutputExtension(output.to_path_buf()))
    }
}

/// Expand glob patterns relative to `base_dir` into a sorted, de-duplicated file list.
///
/// Patterns matching nothing are logged and otherwise ignored.
#[tracing::instrument(skip(patterns), fields(base = %base_dir.display()))]
pub fn expand_patterns(base_dir: &Path, patterns: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let full_pattern = base_dir.join(pattern);
        let full_pattern = full_pattern.to_string_lossy();
        let entries = glob::glob(&full_pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: (*pattern).to_string(),
            message: e.to_string(),
        })?;

        let before = files.len();
        for entry in entries {
            let path = entry.map_err(glob::GlobError::into_error)?;
            if path.is_file() {
                files.push(path);
            }
        }

        if files.len() == before {
            tracing::warn!(pattern, "Pattern matched no files");
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}
