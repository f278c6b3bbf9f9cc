//! Read-only lookups consulted during generation.
//!
//! All three indexes are built once from the schema before any fragment or
//! operation is printed. Every lookup answers present-or-absent; a type the
//! schema never declares is simply absent.

use crate::FieldFilter;
use graphql_hir::{FieldDef, SchemaStructure, TypeDef, TypeDefKind};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Types whose values carry selectable fields, by name
#[derive(Debug, Clone, Default)]
pub struct ObjectIndex<'a> {
    objects: HashMap<&'a str, &'a TypeDef>,
    /// Composite types that cannot be selected without a sub-selection
    /// but expose no fields of their own (unions)
    unions: HashSet<&'a str>,
}

impl<'a> ObjectIndex<'a> {
    pub fn from_schema(schema: &'a SchemaStructure) -> Self {
        let mut index = Self::default();
        for type_def in schema.types() {
            if type_def.has_fields() {
                index.objects.insert(type_def.name.as_ref(), type_def);
            } else if type_def.kind == TypeDefKind::Union {
                index.unions.insert(type_def.name.as_ref());
            }
        }
        index
    }

    pub fn get(&self, type_name: &str) -> Option<&'a TypeDef> {
        self.objects.get(type_name).copied()
    }

    /// The object type a field returns, if it returns one
    pub fn object_for(&self, field: &FieldDef) -> Option<&'a TypeDef> {
        self.get(field.named_type())
    }

    /// Whether the field returns a scalar or enum (or a type the schema never declares)
    #[must_use]
    pub fn is_leaf(&self, field: &FieldDef) -> bool {
        let type_name = field.named_type();
        !self.objects.contains_key(type_name) && !self.unions.contains(type_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Type name to the fragment covering it
#[derive(Debug, Clone, Default)]
pub struct FragmentIndex {
    by_type: HashMap<Arc<str>, Arc<str>>,
}

impl FragmentIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `fragment_name` for `type_name`.
    ///
    /// Returns `false` when the type already had a fragment; the first
    /// registration is kept.
    pub fn register(&mut self, type_name: Arc<str>, fragment_name: Arc<str>) -> bool {
        if let Some(existing) = self.by_type.get(&type_name) {
            tracing::debug!(
                type_name = %type_name,
                existing = %existing,
                ignored = %fragment_name,
                "Type already has a fragment"
            );
            return false;
        }
        self.by_type.insert(type_name, fragment_name);
        true
    }

    pub fn get(&self, type_name: &str) -> Option<&Arc<str>> {
        self.by_type.get(type_name)
    }

    /// The fragment covering a field's return type
    pub fn fragment_for(&self, field: &FieldDef) -> Option<&Arc<str>> {
        self.get(field.named_type())
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.by_type.contains_key(type_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

/// Which data is already reachable from a root query field
#[derive(Debug, Clone, Default)]
pub struct RootQueryIndex<'a> {
    by_type: HashMap<&'a str, &'a FieldDef>,
}

impl<'a> RootQueryIndex<'a> {
    /// Index the valid fields of the schema's query type by the type they return.
    pub fn from_schema(schema: &'a SchemaStructure, filter: &FieldFilter) -> Self {
        let mut by_type = HashMap::new();
        for field in schema
            .query_type()
            .into_iter()
            .flat_map(|query| &query.fields)
            .filter(|field| filter.is_valid(field))
        {
            by_type.entry(field.named_type()).or_insert(field);
        }
        Self { by_type }
    }

    /// A root query field returning the same type as `field`
    pub fn find_query(&self, field: &FieldDef) -> Option<&'a FieldDef> {
        self.by_type.get(field.named_type()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_hir::parse_schema;

    const SCHEMA: &str = r"
type Query {
    team(id: ID!): Team
    teams: [Team!]!
    archived: Team @deprecated
    search: SearchResult
}

type Team { id: ID! name: String! state: TeamState }
enum TeamState { ACTIVE ARCHIVED }
union SearchResult = Team
";

    #[test]
    fn test_object_index_classifies_leaves() {
        let schema = parse_schema(SCHEMA).unwrap();
        let objects = ObjectIndex::from_schema(&schema);
        let query = schema.query_type().unwrap();
        let team = schema.get("Team").unwrap();

        assert!(objects.object_for(query.field("team").unwrap()).is_some());
        assert!(objects.is_leaf(team.field("name").unwrap()));
        assert!(objects.is_leaf(team.field("state").unwrap()));
        assert!(!objects.is_leaf(query.field("search").unwrap()));
        assert!(objects.object_for(query.field("search").unwrap()).is_none());
    }

    #[test]
    fn test_root_query_index_keeps_first_valid_field() {
        let schema = parse_schema(SCHEMA).unwrap();
        let filter = FieldFilter::default();
        let roots = RootQueryIndex::from_schema(&schema, &filter);
        let team_id = schema.get("Team").unwrap().field("id").unwrap();

        let team_field = schema.query_type().unwrap().field("archived").unwrap();
        let found = roots.find_query(team_field).unwrap();
        assert_eq!(found.name.as_ref(), "team");
        assert!(roots.find_query(team_id).is_none());
    }

    #[test]
    fn test_fragment_index_first_registration_wins() {
        let mut fragments = FragmentIndex::new();
        assert!(fragments.register(Arc::from("Team"), Arc::from("TeamFields")));
        assert!(!fragments.register(Arc::from("Team"), Arc::from("Team")));
        assert_eq!(fragments.get("Team").map(|name| name.as_ref()), Some("TeamFields"));
        assert_eq!(fragments.len(), 1);
    }
}
