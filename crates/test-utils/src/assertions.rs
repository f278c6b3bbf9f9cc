//! Assertions over generated document text
//!
//! Generated documents are long; most tests only care about which
//! definitions were emitted. These helpers pull the definition headers out
//! so tests can compare short lists instead of whole documents.

const DEFINITION_KEYWORDS: &[&str] = &["query", "mutation", "fragment"];

/// Collect `"<keyword> <name>"` for every top-level definition in `document`.
///
/// # Example
///
/// ```
/// use graphql_test_utils::definition_names;
///
/// let text = "query user($id: ID!) {\n  user(id: $id) {\n    id\n  }\n}\n";
/// assert_eq!(definition_names(text), vec!["query user"]);
/// ```
pub fn definition_names(document: &str) -> Vec<String> {
    document
        .lines()
        .filter_map(|line| {
            let (keyword, rest) = line.split_once(' ')?;
            if !DEFINITION_KEYWORDS.contains(&keyword) {
                return None;
            }
            let name: String = rest
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            Some(format!("{keyword} {name}"))
        })
        .collect()
}

/// Format the definition names one per line for snapshot testing.
pub fn format_definition_names(document: &str) -> String {
    let names = definition_names(document);
    if names.is_empty() {
        return String::from("(no definitions)");
    }
    names.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_names_skips_nested_lines() {
        let text = "fragment Issue on Issue {\n  id\n}\n\nquery issue {\n  issue {\n    ...Issue\n  }\n}\n";
        assert_eq!(definition_names(text), vec!["fragment Issue", "query issue"]);
    }

    #[test]
    fn test_format_definition_names_empty() {
        assert_eq!(format_definition_names(""), "(no definitions)");
    }
}
