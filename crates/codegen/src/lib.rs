//! Fragment and operation document generation.
//!
//! Given a [`graphql_hir::SchemaStructure`], this crate prints a GraphQL
//! document with one fragment per object type and the operations needed to
//! fetch every root field, plus the nested fields worth fetching on their
//! own.
//!
//! # Examples
//!
//! ```
//! use graphql_codegen::{generate_document, GenerateOptions};
//! use graphql_hir::parse_schema;
//!
//! let schema = parse_schema("type Query { viewer: User } type User { id: ID! name: String }")?;
//! let document = generate_document(&schema, &GenerateOptions::default());
//!
//! let names: Vec<_> = document.operation_names().map(|(_, name)| name).collect();
//! assert_eq!(names, vec!["viewer"]);
//! assert!(document.to_string().contains("fragment User on User"));
//! # Ok::<(), graphql_hir::SchemaError>(())
//! ```
//!
//! The pieces are also usable on their own: build the indexes, then drive a
//! [`Synthesizer`] with a [`FieldPath`].

mod document;
mod filter;
mod fragments;
mod index;
mod operation;
mod path;
mod selection;
mod synthesizer;

pub use document::{generate_document, GenerateOptions, GeneratedDocument};
pub use filter::{FieldFilter, UnknownExclusion};
pub use fragments::{generate_fragments, FragmentDocument};
pub use index::{FragmentIndex, ObjectIndex, RootQueryIndex};
pub use operation::{OperationDocument, OperationKind, PathSegment, VariableDefinition};
pub use path::FieldPath;
pub use selection::{FieldSelection, Selection};
pub use synthesizer::{SkipReason, Synthesizer};
