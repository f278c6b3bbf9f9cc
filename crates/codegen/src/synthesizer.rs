//! Operation synthesis.
//!
//! Two recursions live here and are kept apart on purpose:
//!
//! - [`Synthesizer::body`] answers "what does this field's response shape
//!   look like". It descends into object types until it reaches a fragment
//!   or a leaf.
//! - [`Synthesizer::operations`] answers "which fields deserve their own
//!   standalone operation". For queries it re-enters itself for every child
//!   that passes [`Synthesizer::expansion_skip`].
//!
//! Both recursions terminate on cyclic schemas. Expansion refuses a child
//! whose type already appears on the field path. A body walk expands each
//! type at most once; later fields of that type select only `id`, so a body
//! stays proportional to the schema even when every type links to every
//! other.

use crate::{
    FieldFilter, FieldPath, FieldSelection, FragmentIndex, ObjectIndex, OperationDocument,
    OperationKind, RootQueryIndex, Selection,
};
use graphql_hir::{FieldDef, TypeDef};
use std::collections::HashSet;
use std::fmt;

/// Connection plumbing that is always inlined into the parent's body
const CONNECTION_FIELDS: &[&str] = &["pageInfo", "nodes"];

/// Why a child field is not given its own operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing to nest below a leaf
    Scalar,
    /// The child's type is already on the path
    Cycle,
    /// `pageInfo` / `nodes`
    Connection,
    /// A root query serves the same type more directly
    RootQuery,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar field"),
            Self::Cycle => write!(f, "type already on path"),
            Self::Connection => write!(f, "connection field"),
            Self::RootQuery => write!(f, "served by a root query"),
        }
    }
}

/// Builds operation documents from field paths.
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'a> {
    objects: &'a ObjectIndex<'a>,
    fragments: &'a FragmentIndex,
    root_queries: &'a RootQueryIndex<'a>,
    filter: &'a FieldFilter,
}

impl<'a> Synthesizer<'a> {
    #[must_use]
    pub fn new(
        objects: &'a ObjectIndex<'a>,
        fragments: &'a FragmentIndex,
        root_queries: &'a RootQueryIndex<'a>,
        filter: &'a FieldFilter,
    ) -> Self {
        Self {
            objects,
            fragments,
            root_queries,
            filter,
        }
    }

    /// Print the operation for `path` followed by the operations of its
    /// expandable descendants, separated by blank lines.
    ///
    /// Returns `None` when nothing is emitted: the last field is invalid, or
    /// neither it nor any descendant has a selectable body.
    #[must_use]
    pub fn synthesize(&self, kind: OperationKind, path: &FieldPath<'a>) -> Option<String> {
        let operations = self.operations(kind, path);
        if operations.is_empty() {
            return None;
        }
        Some(
            operations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n\n"),
        )
    }

    /// The structured form of [`Synthesizer::synthesize`], in output order.
    #[must_use]
    pub fn operations(&self, kind: OperationKind, path: &FieldPath<'a>) -> Vec<OperationDocument> {
        let mut operations = Vec::new();
        self.collect(kind, path, &mut operations);
        operations
    }

    fn collect(
        &self,
        kind: OperationKind,
        path: &FieldPath<'a>,
        operations: &mut Vec<OperationDocument>,
    ) {
        let last = path.last();
        if !self.filter.is_valid(last) {
            return;
        }

        if let Some(operation) = self.operation(kind, path) {
            tracing::trace!(operation = %operation.name, "Emitting operation");
            operations.push(operation);
        }

        // Mutations are printed exactly once, shaped by their response type
        if kind != OperationKind::Query {
            return;
        }

        let Some(object) = self.objects.object_for(last) else {
            return;
        };

        for child in &object.fields {
            if let Some(reason) = self.expansion_skip(path, child) {
                tracing::trace!(
                    path = %path.operation_name(),
                    field = %child.name,
                    %reason,
                    "Not expanding field"
                );
                continue;
            }
            self.collect(kind, &path.child(child), operations);
        }
    }

    /// The operation for `path` alone, or `None` when its last field has no body.
    #[must_use]
    pub fn operation(&self, kind: OperationKind, path: &FieldPath<'a>) -> Option<OperationDocument> {
        let body = self.body(path)?;
        Some(OperationDocument::new(kind, path, body))
    }

    /// The selection placed inside the last field of `path`.
    ///
    /// A fragment covering the field's type is spread and nothing more is
    /// printed beneath it. Otherwise an object type prints each of its valid
    /// fields, recursively, expanding every type once per body. Leaves and
    /// invalid fields have no body.
    #[must_use]
    pub fn body(&self, path: &FieldPath<'a>) -> Option<Selection> {
        let mut entered = HashSet::new();
        self.field_body(path.last(), &mut entered)
    }

    fn field_body(
        &self,
        field: &'a FieldDef,
        entered: &mut HashSet<&'a str>,
    ) -> Option<Selection> {
        if !self.filter.is_valid(field) {
            return None;
        }

        if let Some(fragment) = self.fragments.fragment_for(field) {
            return Some(Selection::FragmentSpread(fragment.clone()));
        }

        let object = self.objects.object_for(field)?;
        if !entered.insert(object.name.as_ref()) {
            return self.id_reference(object);
        }

        let fields = self.nested_fields(object, entered);
        if fields.is_empty() {
            None
        } else {
            Some(Selection::Fields(fields))
        }
    }

    /// `{ id }` for a type already expanded elsewhere in the same body
    fn id_reference(&self, object: &TypeDef) -> Option<Selection> {
        let id = object.field("id")?;
        (self.filter.is_valid(id) && self.objects.is_leaf(id))
            .then(|| Selection::Fields(vec![FieldSelection::Scalar(id.name.clone())]))
    }

    fn nested_fields(
        &self,
        object: &'a TypeDef,
        entered: &mut HashSet<&'a str>,
    ) -> Vec<FieldSelection> {
        let mut fields = Vec::new();

        for field in &object.fields {
            // No variables are declared for body fields
            if !self.filter.is_valid(field) || field.has_required_arguments() {
                continue;
            }

            if let Some(selection) = self.field_body(field, entered) {
                fields.push(FieldSelection::Nested {
                    name: field.name.clone(),
                    description: field.description.clone(),
                    selection,
                });
            } else if self.objects.is_leaf(field) {
                fields.push(FieldSelection::Scalar(field.name.clone()));
            } else {
                // Composite without a body: a union, or a re-entered type with no `id`
                tracing::trace!(
                    type_name = %object.name,
                    field = %field.name,
                    "Omitting composite field without a selection"
                );
            }
        }

        fields
    }

    /// Whether `child`, a field of the type `path` ends in, is kept out of
    /// standalone expansion. Rules are checked in order; the first match wins.
    #[must_use]
    pub fn expansion_skip(&self, path: &FieldPath<'a>, child: &FieldDef) -> Option<SkipReason> {
        if self.objects.object_for(child).is_none() {
            return Some(SkipReason::Scalar);
        }
        if path.contains_type(child.named_type()) {
            return Some(SkipReason::Cycle);
        }
        if CONNECTION_FIELDS.contains(&child.name.as_ref()) {
            return Some(SkipReason::Connection);
        }
        if path.len() > 1 && self.root_queries.find_query(child).is_some() {
            return Some(SkipReason::RootQuery);
        }
        None
    }
}
