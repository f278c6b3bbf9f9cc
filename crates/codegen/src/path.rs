use graphql_hir::FieldDef;

/// Chain of fields from a root operation field down to the field being processed.
///
/// The path is the whole recursion state of the synthesizer: the cycle rule
/// compares against the types already on it, the operation name is derived
/// from it, and the wrapper selection is folded from it. It is never empty.
#[derive(Debug, Clone)]
pub struct FieldPath<'a> {
    fields: Vec<&'a FieldDef>,
}

impl<'a> FieldPath<'a> {
    /// A path holding only a root field
    #[must_use]
    pub fn root(field: &'a FieldDef) -> Self {
        Self {
            fields: vec![field],
        }
    }

    /// This path extended by `field`
    #[must_use]
    pub fn child(&self, field: &'a FieldDef) -> Self {
        let mut fields = Vec::with_capacity(self.fields.len() + 1);
        fields.extend_from_slice(&self.fields);
        fields.push(field);
        Self { fields }
    }

    #[must_use]
    pub fn last(&self) -> &'a FieldDef {
        self.fields[self.fields.len() - 1]
    }

    #[must_use]
    pub fn fields(&self) -> &[&'a FieldDef] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names joined by an underscore, e.g. `user_team_issues`
    #[must_use]
    pub fn operation_name(&self) -> String {
        self.fields
            .iter()
            .map(|field| field.name.as_ref())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Whether any field on the path returns `type_name` (wrappers ignored)
    #[must_use]
    pub fn contains_type(&self, type_name: &str) -> bool {
        self.fields
            .iter()
            .any(|field| field.named_type() == type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_hir::parse_schema;
    use graphql_test_utils::fixtures::CONNECTION_SCHEMA;

    #[test]
    fn test_path_name_and_types() {
        let schema = parse_schema(CONNECTION_SCHEMA).unwrap();
        let user = schema.query_type().unwrap().field("user").unwrap();
        let team = schema.get("User").unwrap().field("team").unwrap();
        let issues = schema.get("Team").unwrap().field("issues").unwrap();

        let path = FieldPath::root(user).child(team).child(issues);

        assert_eq!(path.len(), 3);
        assert_eq!(path.operation_name(), "user_team_issues");
        assert_eq!(path.last().name.as_ref(), "issues");
        assert!(path.contains_type("User"));
        assert!(path.contains_type("IssueConnection"));
        assert!(!path.contains_type("Issue"));
    }

    #[test]
    fn test_child_leaves_parent_untouched() {
        let schema = parse_schema(CONNECTION_SCHEMA).unwrap();
        let user = schema.query_type().unwrap().field("user").unwrap();
        let team = schema.get("User").unwrap().field("team").unwrap();

        let root = FieldPath::root(user);
        let child = root.child(team);

        assert_eq!(root.operation_name(), "user");
        assert_eq!(child.operation_name(), "user_team");
    }
}
