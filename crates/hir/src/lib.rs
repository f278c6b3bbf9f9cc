//! Schema structure for GraphQL document generation.
//!
//! This crate parses SDL with `apollo-parser` and extracts the parts of a
//! schema the generator cares about: type definitions, their fields with
//! return types and arguments, deprecation state, and the root operation
//! types. Extensions are merged into their base definitions so consumers
//! see one [`TypeDef`] per name.
//!
//! Fragment definitions can also be read from executable documents with
//! [`extract_fragments`], so fragments written by hand can be reused.
//!
//! # Examples
//!
//! ```
//! use graphql_hir::parse_schema;
//!
//! let schema = parse_schema("type Query { viewer: User } type User { id: ID! }")?;
//! assert_eq!(schema.query_type().map(|t| t.name.as_ref()), Some("Query"));
//! # Ok::<(), graphql_hir::SchemaError>(())
//! ```

mod error;
mod fragments;
mod structure;

pub use error::{Result, SchemaError};
pub use fragments::{extract_fragments, FragmentStructure};
pub use structure::{
    parse_schema, ArgumentDef, FieldDef, RootTypeNames, SchemaBuilder, SchemaStructure, TypeDef,
    TypeDefKind, TypeRef,
};
