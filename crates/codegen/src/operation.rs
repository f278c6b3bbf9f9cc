//! Standalone operation documents.

use crate::selection::{write_comment, write_indent, write_selection};
use crate::{FieldPath, Selection};
use graphql_hir::TypeRef;
use std::fmt::{self, Write};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A `$variable` declared by an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: Arc<str>,
    pub type_ref: TypeRef,
    pub default_value: Option<Arc<str>>,
}

/// One field of the wrapper chain, with the arguments it forwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub name: Arc<str>,
    pub arguments: Vec<Arc<str>>,
}

/// A generated query or mutation.
///
/// The selection nests every field of the path outer-to-inner and places
/// [`OperationDocument::body`] at the innermost position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDocument {
    pub kind: OperationKind,
    pub name: String,
    pub description: Option<Arc<str>>,
    pub variables: Vec<VariableDefinition>,
    pub path: Vec<PathSegment>,
    pub body: Selection,
}

impl OperationDocument {
    /// Wrap `body` in the operation for `path`.
    ///
    /// Variables are the union of every path field's arguments. When two
    /// fields declare an argument with the same name only the first is
    /// declared and both fields receive that variable.
    #[must_use]
    pub fn new(kind: OperationKind, path: &FieldPath<'_>, body: Selection) -> Self {
        let name = path.operation_name();
        let mut variables: Vec<VariableDefinition> = Vec::new();

        for field in path.fields() {
            for argument in &field.arguments {
                if variables.iter().any(|v| v.name == argument.name) {
                    tracing::warn!(
                        operation = %name,
                        field = %field.name,
                        argument = %argument.name,
                        "Duplicate argument name along path; reusing the first variable"
                    );
                    continue;
                }
                variables.push(VariableDefinition {
                    name: argument.name.clone(),
                    type_ref: argument.type_ref.clone(),
                    default_value: argument.default_value.clone(),
                });
            }
        }

        let segments = path
            .fields()
            .iter()
            .map(|field| PathSegment {
                name: field.name.clone(),
                arguments: field.arguments.iter().map(|a| a.name.clone()).collect(),
            })
            .collect();

        Self {
            kind,
            name,
            description: path.last().description.clone(),
            variables,
            path: segments,
            body,
        }
    }
}

impl fmt::Display for OperationDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();

        if let Some(description) = &self.description {
            write_comment(&mut out, description, 0);
        }

        write!(out, "{} {}", self.kind, self.name).unwrap();
        if !self.variables.is_empty() {
            out.push('(');
            for (i, variable) in self.variables.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write!(out, "${}: {}", variable.name, variable.type_ref).unwrap();
                if let Some(default) = &variable.default_value {
                    write!(out, " = {default}").unwrap();
                }
            }
            out.push(')');
        }
        out.push_str(" {\n");

        // Fold the path outer-to-inner; the body sits inside the last segment
        for (depth, segment) in self.path.iter().enumerate() {
            write_indent(&mut out, depth + 1);
            out.push_str(&segment.name);
            if !segment.arguments.is_empty() {
                out.push('(');
                for (i, argument) in segment.arguments.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write!(out, "{argument}: ${argument}").unwrap();
                }
                out.push(')');
            }
            out.push_str(" {\n");
        }

        write_selection(&mut out, &self.body, self.path.len() + 1);

        for depth in (1..=self.path.len()).rev() {
            write_indent(&mut out, depth);
            out.push_str("}\n");
        }
        out.push('}');

        f.write_str(&out)
    }
}
