//! Selection shapes and their text rendering.
//!
//! Traversal builds [`Selection`] values; only the functions in this module
//! turn them into text. Output uses two-space indentation.

use std::fmt::{self, Write};
use std::sync::Arc;

const INDENT: &str = "  ";

/// The contents of a field's braces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// `...Fragment`, covering the whole type
    FragmentSpread(Arc<str>),
    /// One line (or nested block) per selected field
    Fields(Vec<FieldSelection>),
}

/// A single selected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    /// A leaf selected by name alone
    Scalar(Arc<str>),
    /// A composite field with its own braces
    Nested {
        name: Arc<str>,
        description: Option<Arc<str>>,
        selection: Selection,
    },
}

impl FieldSelection {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(name) | Self::Nested { name, .. } => name,
        }
    }
}

impl Selection {
    /// Selected field names at this level (empty for a fragment spread)
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        let fields: &[FieldSelection] = match self {
            Self::FragmentSpread(_) => &[],
            Self::Fields(fields) => fields,
        };
        fields.iter().map(FieldSelection::name)
    }

    /// The nested selection of a direct child field
    pub fn child(&self, name: &str) -> Option<&Selection> {
        let Self::Fields(fields) = self else {
            return None;
        };
        fields.iter().find_map(|field| match field {
            FieldSelection::Nested {
                name: field_name,
                selection,
                ..
            } if field_name.as_ref() == name => Some(selection),
            _ => None,
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_selection(&mut out, self, 0);
        f.write_str(out.trim_end())
    }
}

pub(crate) fn write_selection(out: &mut String, selection: &Selection, depth: usize) {
    match selection {
        Selection::FragmentSpread(fragment) => {
            write_indent(out, depth);
            writeln!(out, "...{fragment}").unwrap();
        }
        Selection::Fields(fields) => {
            for field in fields {
                write_field(out, field, depth);
            }
        }
    }
}

fn write_field(out: &mut String, field: &FieldSelection, depth: usize) {
    match field {
        FieldSelection::Scalar(name) => {
            write_indent(out, depth);
            writeln!(out, "{name}").unwrap();
        }
        FieldSelection::Nested {
            name,
            description,
            selection,
        } => {
            write_indent(out, depth);
            writeln!(out, "{name} {{").unwrap();
            if let Some(description) = description {
                write_comment(out, description, depth + 1);
            }
            write_selection(out, selection, depth + 1);
            write_indent(out, depth);
            out.push_str("}\n");
        }
    }
}

/// Write `text` as `#` comment lines
pub(crate) fn write_comment(out: &mut String, text: &str, depth: usize) {
    for line in text.lines() {
        write_indent(out, depth);
        if line.is_empty() {
            out.push_str("#\n");
        } else {
            writeln!(out, "# {line}").unwrap();
        }
    }
}

pub(crate) fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_selection_rendering() {
        let selection = Selection::Fields(vec![
            FieldSelection::Scalar(Arc::from("id")),
            FieldSelection::Nested {
                name: Arc::from("pageInfo"),
                description: Some(Arc::from("Pagination state")),
                selection: Selection::FragmentSpread(Arc::from("PageInfo")),
            },
        ]);

        insta::assert_snapshot!(selection.to_string(), @r"
        id
        pageInfo {
          # Pagination state
          ...PageInfo
        }
        ");
    }

    #[test]
    fn test_child_lookup() {
        let selection = Selection::Fields(vec![
            FieldSelection::Scalar(Arc::from("id")),
            FieldSelection::Nested {
                name: Arc::from("team"),
                description: None,
                selection: Selection::FragmentSpread(Arc::from("Team")),
            },
        ]);

        assert_eq!(
            selection.child("team"),
            Some(&Selection::FragmentSpread(Arc::from("Team")))
        );
        assert_eq!(selection.child("id"), None);
        assert_eq!(selection.field_names().collect::<Vec<_>>(), vec!["id", "team"]);
    }
}
