//! Configuration for graphql-docgen.
//!
//! A project is configured with a `.graphql-docgen.yml` (or `.yaml` /
//! `.json`) file, discovered by walking up from the working directory:
//!
//! ```yaml
//! schema: schema/*.graphql
//! documents: fragments/*.graphql
//! output: generated/documents.graphql
//! fragments: true
//! includeDeprecated: false
//! exclude: [User.secret, internalField]
//! ```

mod config;
mod error;
mod loader;

pub use config::{DocgenConfig, DocumentsConfig, SchemaConfig};
pub use error::{ConfigError, Result};
pub use loader::{
    expand_patterns, find_config, load_config, load_config_from_str, validate_output, CONFIG_FILES,
};
