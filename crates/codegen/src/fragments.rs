//! Per-type fragment generation.
//!
//! Every non-root object type gets `fragment Type on Type`, selecting its
//! leaves directly and referencing related objects by `id` where it can.
//! Lists and connections are left out; they are fetched by their own
//! operations instead.

use crate::selection::{write_comment, write_selection};
use crate::{FieldFilter, FieldSelection, FragmentIndex, ObjectIndex, Selection};
use graphql_hir::{FieldDef, SchemaStructure, TypeDef, TypeDefKind};
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::Arc;

/// A generated `fragment Name on Type { ... }` definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentDocument {
    pub name: Arc<str>,
    pub type_condition: Arc<str>,
    pub description: Option<Arc<str>>,
    pub selection: Selection,
}

impl fmt::Display for FragmentDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        if let Some(description) = &self.description {
            write_comment(&mut out, description, 0);
        }
        writeln!(out, "fragment {} on {} {{", self.name, self.type_condition).unwrap();
        write_selection(&mut out, &self.selection, 1);
        out.push('}');
        f.write_str(&out)
    }
}

/// Whether a type is a paginated connection
fn is_connection(type_def: &TypeDef) -> bool {
    type_def.field("nodes").is_some() && type_def.field("pageInfo").is_some()
}

/// Generate fragments for the object types `index` does not already cover.
///
/// Each generated fragment is registered in `index` so later lookups (and
/// the operation synthesizer) spread it.
#[tracing::instrument(skip_all, fields(existing = index.len()))]
pub fn generate_fragments(
    schema: &SchemaStructure,
    objects: &ObjectIndex<'_>,
    filter: &FieldFilter,
    index: &mut FragmentIndex,
) -> Vec<FragmentDocument> {
    let candidates: Vec<&TypeDef> = schema
        .types()
        .filter(|t| t.kind == TypeDefKind::Object)
        .filter(|t| !schema.roots().is_root_type(&t.name))
        .filter(|t| !index.contains(&t.name))
        .collect();

    for candidate in &candidates {
        index.register(candidate.name.clone(), candidate.name.clone());
    }

    let mut generator = FragmentGenerator {
        objects,
        filter,
        index,
        spreads: HashMap::new(),
    };

    let fragments: Vec<FragmentDocument> = candidates
        .iter()
        .map(|type_def| generator.fragment(type_def))
        .collect();

    tracing::debug!(count = fragments.len(), "Generated fragments");
    fragments
}

struct FragmentGenerator<'i, 'a> {
    objects: &'i ObjectIndex<'a>,
    filter: &'i FieldFilter,
    index: &'i FragmentIndex,
    /// Fragment spreads emitted so far, by the type whose fragment contains them
    spreads: HashMap<Arc<str>, Vec<Arc<str>>>,
}

impl FragmentGenerator<'_, '_> {
    fn fragment(&mut self, type_def: &TypeDef) -> FragmentDocument {
        let connection = is_connection(type_def);
        let mut fields = vec![FieldSelection::Scalar(Arc::from("__typename"))];

        for field in &type_def.fields {
            if !self.filter.is_valid(field) || field.has_required_arguments() {
                continue;
            }
            if let Some(selection) = self.field_selection(type_def, field, connection) {
                fields.push(selection);
            }
        }

        FragmentDocument {
            name: type_def.name.clone(),
            type_condition: type_def.name.clone(),
            description: type_def.description.clone(),
            selection: Selection::Fields(fields),
        }
    }

    fn field_selection(
        &mut self,
        owner: &TypeDef,
        field: &FieldDef,
        in_connection: bool,
    ) -> Option<FieldSelection> {
        let Some(target) = self.objects.object_for(field) else {
            return self
                .objects
                .is_leaf(field)
                .then(|| FieldSelection::Scalar(field.name.clone()));
        };

        let selection = if in_connection && matches!(field.name.as_ref(), "nodes" | "pageInfo") {
            self.spread(owner, target).or_else(|| id_selection(target))?
        } else if is_connection(target) || field.type_ref.is_list() {
            return None;
        } else if let Some(id) = id_selection(target) {
            id
        } else {
            self.spread(owner, target)?
        };

        Some(FieldSelection::Nested {
            name: field.name.clone(),
            description: None,
            selection,
        })
    }

    /// Spread `target`'s fragment inside `owner`'s, unless that closes a spread cycle
    fn spread(&mut self, owner: &TypeDef, target: &TypeDef) -> Option<Selection> {
        let fragment = self.index.get(&target.name)?.clone();
        if self.reaches(&target.name, &owner.name) {
            tracing::debug!(
                owner = %owner.name,
                target = %target.name,
                "Skipping fragment spread that would form a cycle"
            );
            return None;
        }
        self.spreads
            .entry(owner.name.clone())
            .or_default()
            .push(target.name.clone());
        Some(Selection::FragmentSpread(fragment))
    }

    /// Whether `from`'s fragment (transitively) spreads `to`'s
    fn reaches(&self, from: &str, to: &str) -> bool {
        let mut stack = vec![from];
        let mut visited: Vec<&str> = Vec::new();
        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if visited.contains(&current) {
                continue;
            }
            visited.push(current);
            if let Some(next) = self.spreads.get(current) {
                stack.extend(next.iter().map(|name| name.as_ref()));
            }
        }
        false
    }
}

fn id_selection(target: &TypeDef) -> Option<Selection> {
    target
        .field("id")
        .map(|_| Selection::Fields(vec![FieldSelection::Scalar(Arc::from("id"))]))
}
