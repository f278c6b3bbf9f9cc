//! Whole-document assembly: fragments first, then every operation.

use crate::{
    generate_fragments, FieldFilter, FieldPath, FragmentDocument, FragmentIndex, ObjectIndex,
    OperationDocument, OperationKind, RootQueryIndex, Synthesizer,
};
use graphql_hir::{FragmentStructure, SchemaStructure};
use std::fmt;

/// Options for [`generate_document`]
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Generate a fragment for every object type
    pub fragments: bool,
    /// Keep deprecated fields
    pub include_deprecated: bool,
    /// Field exclusions, `field` or `Type.field`
    pub exclude: Vec<String>,
    /// Fragments defined elsewhere; they take precedence over generated ones
    pub external_fragments: Vec<FragmentStructure>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            fragments: true,
            include_deprecated: false,
            exclude: Vec::new(),
            external_fragments: Vec::new(),
        }
    }
}

/// Output of one generation run
#[derive(Debug, Clone, Default)]
pub struct GeneratedDocument {
    pub fragments: Vec<FragmentDocument>,
    pub operations: Vec<OperationDocument>,
}

impl GeneratedDocument {
    /// `(kind, name)` of each operation in output order
    pub fn operation_names(&self) -> impl Iterator<Item = (OperationKind, &str)> {
        self.operations
            .iter()
            .map(|operation| (operation.kind, operation.name.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty() && self.operations.is_empty()
    }
}

impl fmt::Display for GeneratedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let definitions: Vec<String> = self
            .fragments
            .iter()
            .map(ToString::to_string)
            .chain(self.operations.iter().map(ToString::to_string))
            .collect();
        if definitions.is_empty() {
            return Ok(());
        }
        writeln!(f, "{}", definitions.join("\n\n"))
    }
}

/// Generate the fragments and operations for a whole schema.
///
/// Every root query field is synthesized with its expandable descendants;
/// every root mutation field yields at most one operation.
#[tracing::instrument(skip_all, fields(types = schema.len(), fragments = options.fragments))]
pub fn generate_document(schema: &SchemaStructure, options: &GenerateOptions) -> GeneratedDocument {
    let filter = FieldFilter::new(options.exclude.iter().cloned(), options.include_deprecated);
    for unknown in filter.unknown_exclusions(schema) {
        match unknown.suggestion {
            Some(suggestion) => tracing::warn!(
                entry = %unknown.entry,
                "Exclusion matches no field; did you mean '{suggestion}'?"
            ),
            None => tracing::warn!(entry = %unknown.entry, "Exclusion matches no field"),
        }
    }

    let objects = ObjectIndex::from_schema(schema);
    let root_queries = RootQueryIndex::from_schema(schema, &filter);

    let mut fragment_index = FragmentIndex::new();
    for fragment in &options.external_fragments {
        fragment_index.register(fragment.type_condition.clone(), fragment.name.clone());
    }

    let fragments = if options.fragments {
        tracing::info!("Generating fragments");
        generate_fragments(schema, &objects, &filter, &mut fragment_index)
    } else {
        Vec::new()
    };

    tracing::info!("Generating operations");
    let synthesizer = Synthesizer::new(&objects, &fragment_index, &root_queries, &filter);
    let mut operations = Vec::new();

    let roots = [
        (OperationKind::Query, schema.query_type()),
        (OperationKind::Mutation, schema.mutation_type()),
    ];
    for (kind, root_type) in roots {
        let Some(root_type) = root_type else {
            continue;
        };
        for field in &root_type.fields {
            operations.extend(synthesizer.operations(kind, &FieldPath::root(field)));
        }
    }

    tracing::info!(
        fragments = fragments.len(),
        operations = operations.len(),
        "Document generated"
    );

    GeneratedDocument {
        fragments,
        operations,
    }
}
