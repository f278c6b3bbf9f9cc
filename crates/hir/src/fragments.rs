//! Fragment definitions read from executable documents.

use crate::{Result, SchemaError};
use apollo_parser::cst;
use std::sync::Arc;

/// Fragment structure (name and type condition, no selection set details)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentStructure {
    pub name: Arc<str>,
    pub type_condition: Arc<str>,
}

/// Collect the fragment definitions of an executable document.
///
/// Operations and other definitions in the document are ignored.
#[tracing::instrument(skip(source), fields(size = source.len()))]
pub fn extract_fragments(path: &str, source: &str) -> Result<Vec<FragmentStructure>> {
    let tree = apollo_parser::Parser::new(source).parse();

    if let Some(error) = tree.errors().next() {
        return Err(SchemaError::Parse {
            path: path.to_string(),
            message: error.message().to_string(),
            index: error.index(),
        });
    }

    let fragments: Vec<FragmentStructure> = tree
        .document()
        .definitions()
        .filter_map(|definition| match definition {
            cst::Definition::FragmentDefinition(frag) => extract_fragment_structure(&frag),
            _ => None,
        })
        .collect();

    tracing::debug!(count = fragments.len(), "Extracted fragments");
    Ok(fragments)
}

fn extract_fragment_structure(frag: &cst::FragmentDefinition) -> Option<FragmentStructure> {
    let name = Arc::from(frag.fragment_name()?.name()?.text().as_str());
    let type_condition = Arc::from(frag.type_condition()?.named_type()?.name()?.text().as_str());

    Some(FragmentStructure {
        name,
        type_condition,
    })
}
