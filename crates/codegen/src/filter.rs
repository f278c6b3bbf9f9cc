//! Which schema fields may appear in generated documents.

use graphql_hir::{FieldDef, SchemaStructure};
use std::collections::HashSet;

/// Minimum similarity for an exclusion entry to be suggested as a typo fix
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Field validity predicate.
///
/// A field is invalid when it is deprecated (unless deprecated fields are
/// included), when it is introspection-only (`__` prefix), or when it is
/// excluded by name. Exclusion entries are either a bare field name, which
/// matches on every type, or `Type.field`.
#[derive(Debug, Clone, Default)]
pub struct FieldFilter {
    excluded: HashSet<String>,
    include_deprecated: bool,
}

/// An exclusion entry that matches no field in the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExclusion {
    pub entry: String,
    pub suggestion: Option<String>,
}

impl FieldFilter {
    pub fn new<I, S>(exclude: I, include_deprecated: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: exclude.into_iter().map(Into::into).collect(),
            include_deprecated,
        }
    }

    #[must_use]
    pub fn is_valid(&self, field: &FieldDef) -> bool {
        if field.name.starts_with("__") {
            return false;
        }
        if field.is_deprecated && !self.include_deprecated {
            return false;
        }
        !self.is_excluded(field)
    }

    fn is_excluded(&self, field: &FieldDef) -> bool {
        if self.excluded.is_empty() {
            return false;
        }
        self.excluded.contains(field.name.as_ref())
            || self
                .excluded
                .contains(&format!("{}.{}", field.parent_type, field.name))
    }

    /// Exclusion entries that match nothing, with the closest real field as a hint.
    pub fn unknown_exclusions(&self, schema: &SchemaStructure) -> Vec<UnknownExclusion> {
        let mut known: HashSet<String> = HashSet::new();
        for type_def in schema.types() {
            for field in &type_def.fields {
                known.insert(field.name.to_string());
                known.insert(format!("{}.{}", type_def.name, field.name));
            }
        }

        let mut unknown: Vec<UnknownExclusion> = self
            .excluded
            .iter()
            .filter(|entry| !known.contains(*entry))
            .map(|entry| {
                let suggestion = known
                    .iter()
                    .map(|candidate| (strsim::jaro_winkler(entry, candidate), candidate))
                    .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
                    .max_by(|a, b| a.0.total_cmp(&b.0).then_with(|| b.1.cmp(a.1)))
                    .map(|(_, candidate)| candidate.clone());
                UnknownExclusion {
                    entry: entry.clone(),
                    suggestion,
                }
            })
            .collect();
        unknown.sort_by(|a, b| a.entry.cmp(&b.entry));
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_hir::parse_schema;

    const SCHEMA: &str = r"
type Query {
    viewer: User
    __internal: String
}

type User {
    id: ID!
    email: String!
    nickname: String @deprecated
}

type Team {
    id: ID!
    email: String
}
";

    #[test]
    fn test_deprecated_fields_are_invalid_by_default() {
        let schema = parse_schema(SCHEMA).unwrap();
        let nickname = schema.get("User").unwrap().field("nickname").unwrap();

        assert!(!FieldFilter::default().is_valid(nickname));
        assert!(FieldFilter::new(Vec::<String>::new(), true).is_valid(nickname));
    }

    #[test]
    fn test_introspection_fields_are_invalid() {
        let schema = parse_schema(SCHEMA).unwrap();
        let internal = schema.query_type().unwrap().field("__internal").unwrap();
        assert!(!FieldFilter::new(Vec::<String>::new(), true).is_valid(internal));
    }

    #[test]
    fn test_exclusion_by_name_and_by_type() {
        let schema = parse_schema(SCHEMA).unwrap();
        let user_email = schema.get("User").unwrap().field("email").unwrap();
        let team_email = schema.get("Team").unwrap().field("email").unwrap();

        let by_type = FieldFilter::new(["User.email"], false);
        assert!(!by_type.is_valid(user_email));
        assert!(by_type.is_valid(team_email));

        let by_name = FieldFilter::new(["email"], false);
        assert!(!by_name.is_valid(user_email));
        assert!(!by_name.is_valid(team_email));
    }

    #[test]
    fn test_unknown_exclusions_suggest_close_match() {
        let schema = parse_schema(SCHEMA).unwrap();
        let filter = FieldFilter::new(["User.emial", "Team.id", "zzz"], false);

        let unknown = filter.unknown_exclusions(&schema);
        assert_eq!(unknown.len(), 2);
        assert_eq!(unknown[0].entry, "User.emial");
        assert_eq!(unknown[0].suggestion.as_deref(), Some("User.email"));
        assert_eq!(unknown[1].entry, "zzz");
        assert_eq!(unknown[1].suggestion, None);
    }
}
