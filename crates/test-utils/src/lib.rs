//! # GraphQL Test Utilities
//!
//! Shared test infrastructure for the graphql-docgen crates.

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_raw_string_hashes)]
//!
//! ## Modules
//!
//! - [`fixtures`] - Schemas shaped to exercise each traversal rule
//! - [`assertions`] - Helpers for inspecting generated document text

pub mod assertions;
pub mod fixtures;

pub use assertions::{definition_names, format_definition_names};
