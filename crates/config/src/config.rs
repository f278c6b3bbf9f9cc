use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocgenConfig {
    /// Schema source(s)
    pub schema: SchemaConfig,

    /// Documents holding hand-written fragments to reuse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<DocumentsConfig>,

    /// Where to write the generated document; stdout when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Generate one fragment per object type
    #[serde(default = "default_fragments")]
    pub fragments: bool,

    /// Keep deprecated fields in generated documents
    #[serde(default)]
    pub include_deprecated: bool,

    /// Fields to leave out, either `field` or `Type.field`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

const fn default_fragments() -> bool {
    true
}

impl DocgenConfig {
    /// A config reading only the given schema patterns, everything else defaulted
    #[must_use]
    pub fn with_schema(schema: SchemaConfig) -> Self {
        Self {
            schema,
            documents: None,
            output: None,
            fragments: default_fragments(),
            include_deprecated: false,
            exclude: Vec::new(),
        }
    }

    /// Document patterns, empty when none are configured
    #[must_use]
    pub fn document_patterns(&self) -> Vec<&str> {
        self.documents
            .as_ref()
            .map(DocumentsConfig::patterns)
            .unwrap_or_default()
    }
}

/// Schema source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaConfig {
    /// Single file path or glob pattern
    Path(String),
    /// Multiple file paths or glob patterns
    Paths(Vec<String>),
}

impl SchemaConfig {
    /// Get all schema paths/patterns
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::Path(path) => vec![path.as_str()],
            Self::Paths(paths) => paths.iter().map(String::as_str).collect(),
        }
    }
}

impl From<Vec<String>> for SchemaConfig {
    fn from(mut paths: Vec<String>) -> Self {
        if paths.len() == 1 {
            Self::Path(paths.remove(0))
        } else {
            Self::Paths(paths)
        }
    }
}

/// Documents source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentsConfig {
    /// Single pattern
    Pattern(String),
    /// Multiple patterns
    Patterns(Vec<String>),
}

impl DocumentsConfig {
    /// Get all document patterns
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Self::Pattern(pattern) => vec![pattern.as_str()],
            Self::Patterns(patterns) => patterns.iter().map(String::as_str).collect(),
        }
    }
}
