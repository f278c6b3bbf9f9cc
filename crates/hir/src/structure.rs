// Structure extraction - names, signatures and return types of schema definitions.
// Everything here is immutable once `SchemaBuilder::build` returns.

use crate::{Result, SchemaError};
use apollo_parser::cst::{self, CstNode};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Structure of a type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: Arc<str>,
    pub kind: TypeDefKind,
    pub fields: Vec<FieldDef>,
    pub description: Option<Arc<str>>,
}

impl TypeDef {
    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name.as_ref() == name)
    }

    /// Whether values of this type carry their own fields
    #[must_use]
    pub fn has_fields(&self) -> bool {
        matches!(self.kind, TypeDefKind::Object | TypeDefKind::Interface)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDefKind {
    Object,
    Interface,
    Union,
    Enum,
    Scalar,
    InputObject,
}

/// A field declared on an object or interface type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: Arc<str>,
    /// Name of the type declaring this field
    pub parent_type: Arc<str>,
    pub type_ref: TypeRef,
    pub arguments: Vec<ArgumentDef>,
    pub description: Option<Arc<str>>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<Arc<str>>,
}

impl FieldDef {
    /// The return type with list and non-null wrappers removed
    #[must_use]
    pub fn named_type(&self) -> &str {
        self.type_ref.named_type()
    }

    /// Whether any argument must be supplied by the caller
    #[must_use]
    pub fn has_required_arguments(&self) -> bool {
        self.arguments.iter().any(ArgumentDef::is_required)
    }
}

/// Argument definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDef {
    pub name: Arc<str>,
    pub type_ref: TypeRef,
    pub default_value: Option<Arc<str>>,
    pub description: Option<Arc<str>>,
}

impl ArgumentDef {
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.type_ref.is_non_null() && self.default_value.is_none()
    }
}

/// Reference to a type, keeping its list/non-null wrappers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(Arc<str>),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Innermost named type
    #[must_use]
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }

    #[must_use]
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Whether a list wrapper appears anywhere in the type
    #[must_use]
    pub fn is_list(&self) -> bool {
        match self {
            Self::Named(_) => false,
            Self::List(_) => true,
            Self::NonNull(inner) => inner.is_list(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// Root operation type names
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RootTypeNames {
    pub query: Option<Arc<str>>,
    pub mutation: Option<Arc<str>>,
    pub subscription: Option<Arc<str>>,
}

impl RootTypeNames {
    /// Check if a type name is one of the root operation types
    #[must_use]
    pub fn is_root_type(&self, type_name: &str) -> bool {
        self.query.as_deref() == Some(type_name)
            || self.mutation.as_deref() == Some(type_name)
            || self.subscription.as_deref() == Some(type_name)
    }
}

/// The merged, immutable view of every schema source
#[derive(Debug, Clone)]
pub struct SchemaStructure {
    types: Vec<TypeDef>,
    by_name: HashMap<Arc<str>, usize>,
    roots: RootTypeNames,
}

impl SchemaStructure {
    /// Type definitions in declaration order
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.iter()
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.by_name.get(name).map(|&idx| &self.types[idx])
    }

    #[must_use]
    pub fn roots(&self) -> &RootTypeNames {
        &self.roots
    }

    pub fn query_type(&self) -> Option<&TypeDef> {
        self.roots.query.as_deref().and_then(|name| self.get(name))
    }

    pub fn mutation_type(&self) -> Option<&TypeDef> {
        self.roots.mutation.as_deref().and_then(|name| self.get(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Parse a single SDL source into a [`SchemaStructure`].
pub fn parse_schema(source: &str) -> Result<SchemaStructure> {
    let mut builder = SchemaBuilder::default();
    builder.add_source("schema.graphql", source)?;
    builder.build()
}

/// Accumulates definitions from one or more SDL sources.
///
/// Extensions are held back until [`SchemaBuilder::build`] so that an
/// `extend type` may appear in a file read before its base definition.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    types: Vec<TypeDef>,
    by_name: HashMap<Arc<str>, usize>,
    extensions: Vec<(Arc<str>, Vec<FieldDef>)>,
    explicit_roots: Option<RootTypeNames>,
}

impl SchemaBuilder {
    /// Parse `source` and collect its definitions. `path` is only used in errors.
    #[tracing::instrument(skip(self, source), fields(size = source.len()))]
    pub fn add_source(&mut self, path: &str, source: &str) -> Result<()> {
        let tree = apollo_parser::Parser::new(source).parse();

        if let Some(error) = tree.errors().next() {
            return Err(SchemaError::Parse {
                path: path.to_string(),
                message: error.message().to_string(),
                index: error.index(),
            });
        }

        let document = tree.document();
        for definition in document.definitions() {
            match definition {
                cst::Definition::SchemaDefinition(schema) => {
                    self.explicit_roots = Some(extract_root_types(&schema));
                }
                cst::Definition::ObjectTypeDefinition(obj) => {
                    if let Some(type_def) = extract_object_type(&obj) {
                        self.insert(type_def);
                    }
                }
                cst::Definition::InterfaceTypeDefinition(iface) => {
                    if let Some(type_def) = extract_interface_type(&iface) {
                        self.insert(type_def);
                    }
                }
                cst::Definition::ObjectTypeExtension(ext) => {
                    if let Some(name) = ext.name() {
                        let name: Arc<str> = Arc::from(name.text().as_str());
                        let fields = extract_fields(&name, ext.fields_definition());
                        self.extensions.push((name, fields));
                    }
                }
                cst::Definition::InterfaceTypeExtension(ext) => {
                    if let Some(name) = ext.name() {
                        let name: Arc<str> = Arc::from(name.text().as_str());
                        let fields = extract_fields(&name, ext.fields_definition());
                        self.extensions.push((name, fields));
                    }
                }
                cst::Definition::UnionTypeDefinition(union) => {
                    if let Some(type_def) =
                        extract_leaf_type(union.name(), union.description(), TypeDefKind::Union)
                    {
                        self.insert(type_def);
                    }
                }
                cst::Definition::EnumTypeDefinition(enum_def) => {
                    if let Some(type_def) = extract_leaf_type(
                        enum_def.name(),
                        enum_def.description(),
                        TypeDefKind::Enum,
                    ) {
                        self.insert(type_def);
                    }
                }
                cst::Definition::ScalarTypeDefinition(scalar) => {
                    if let Some(type_def) =
                        extract_leaf_type(scalar.name(), scalar.description(), TypeDefKind::Scalar)
                    {
                        self.insert(type_def);
                    }
                }
                cst::Definition::InputObjectTypeDefinition(input) => {
                    if let Some(type_def) = extract_leaf_type(
                        input.name(),
                        input.description(),
                        TypeDefKind::InputObject,
                    ) {
                        self.insert(type_def);
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(path, types = self.types.len(), "Collected schema source");
        Ok(())
    }

    /// Merge pending extensions and resolve root types.
    pub fn build(mut self) -> Result<SchemaStructure> {
        for (name, fields) in std::mem::take(&mut self.extensions) {
            let Some(&idx) = self.by_name.get(&name) else {
                tracing::warn!(type_name = %name, "Ignoring extension of undefined type");
                continue;
            };
            let target = &mut self.types[idx];
            for field in fields {
                if target.field(&field.name).is_some() {
                    tracing::warn!(
                        type_name = %name,
                        field = %field.name,
                        "Ignoring duplicate field from extension"
                    );
                    continue;
                }
                target.fields.push(field);
            }
        }

        let roots = self.explicit_roots.take().unwrap_or_else(|| {
            let default_root = |name: &str| -> Option<Arc<str>> {
                self.by_name.contains_key(name).then(|| Arc::from(name))
            };
            RootTypeNames {
                query: default_root("Query"),
                mutation: default_root("Mutation"),
                subscription: default_root("Subscription"),
            }
        });

        if roots
            .query
            .as_deref()
            .is_none_or(|name| !self.by_name.contains_key(name))
        {
            return Err(SchemaError::MissingQueryType);
        }

        tracing::debug!(
            types = self.types.len(),
            query = ?roots.query,
            mutation = ?roots.mutation,
            "Schema structure built"
        );

        Ok(SchemaStructure {
            types: self.types,
            by_name: self.by_name,
            roots,
        })
    }

    fn insert(&mut self, type_def: TypeDef) {
        if self.by_name.contains_key(&type_def.name) {
            tracing::warn!(type_name = %type_def.name, "Ignoring duplicate type definition");
            return;
        }
        self.by_name.insert(type_def.name.clone(), self.types.len());
        self.types.push(type_def);
    }
}

fn extract_root_types(schema: &cst::SchemaDefinition) -> RootTypeNames {
    let mut result = RootTypeNames::default();

    for root_op in schema.root_operation_type_definitions() {
        let Some(op_type) = root_op.operation_type() else {
            continue;
        };
        let Some(name) = root_op.named_type().and_then(|t| t.name()) else {
            continue;
        };
        let type_name = Some(Arc::from(name.text().as_str()));

        if op_type.query_token().is_some() {
            result.query = type_name;
        } else if op_type.mutation_token().is_some() {
            result.mutation = type_name;
        } else if op_type.subscription_token().is_some() {
            result.subscription = type_name;
        }
    }

    result
}

fn extract_object_type(obj: &cst::ObjectTypeDefinition) -> Option<TypeDef> {
    let name: Arc<str> = Arc::from(obj.name()?.text().as_str());
    let fields = extract_fields(&name, obj.fields_definition());

    Some(TypeDef {
        description: obj.description().as_ref().map(description_text),
        name,
        kind: TypeDefKind::Object,
        fields,
    })
}

fn extract_interface_type(iface: &cst::InterfaceTypeDefinition) -> Option<TypeDef> {
    let name: Arc<str> = Arc::from(iface.name()?.text().as_str());
    let fields = extract_fields(&name, iface.fields_definition());

    Some(TypeDef {
        description: iface.description().as_ref().map(description_text),
        name,
        kind: TypeDefKind::Interface,
        fields,
    })
}

/// Types whose inner structure the generator never descends into
fn extract_leaf_type(
    name: Option<cst::Name>,
    description: Option<cst::Description>,
    kind: TypeDefKind,
) -> Option<TypeDef> {
    Some(TypeDef {
        name: Arc::from(name?.text().as_str()),
        kind,
        fields: Vec::new(),
        description: description.as_ref().map(description_text),
    })
}

fn extract_fields(parent_type: &Arc<str>, fields: Option<cst::FieldsDefinition>) -> Vec<FieldDef> {
    fields
        .into_iter()
        .flat_map(|fields| fields.field_definitions())
        .filter_map(|f| extract_field(parent_type, &f))
        .collect()
}

fn extract_field(parent_type: &Arc<str>, field: &cst::FieldDefinition) -> Option<FieldDef> {
    let name = Arc::from(field.name()?.text().as_str());
    let type_ref = extract_type_ref(&field.ty()?)?;
    let (is_deprecated, deprecation_reason) = extract_deprecation(field.directives());

    let arguments = field
        .arguments_definition()
        .into_iter()
        .flat_map(|args| args.input_value_definitions())
        .filter_map(|a| extract_argument_def(&a))
        .collect();

    Some(FieldDef {
        name,
        parent_type: parent_type.clone(),
        type_ref,
        arguments,
        description: field.description().as_ref().map(description_text),
        is_deprecated,
        deprecation_reason,
    })
}

fn extract_argument_def(arg: &cst::InputValueDefinition) -> Option<ArgumentDef> {
    let name = Arc::from(arg.name()?.text().as_str());
    let type_ref = extract_type_ref(&arg.ty()?)?;
    let default_value = arg.default_value().and_then(|v| {
        v.value()
            .map(|val| Arc::from(val.syntax().text().to_string().trim()))
    });

    Some(ArgumentDef {
        name,
        type_ref,
        default_value,
        description: arg.description().as_ref().map(description_text),
    })
}

fn extract_type_ref(ty: &cst::Type) -> Option<TypeRef> {
    match ty {
        cst::Type::NamedType(named) => Some(TypeRef::Named(Arc::from(
            named.name()?.text().as_str(),
        ))),
        cst::Type::ListType(list) => {
            let inner = extract_type_ref(&list.ty()?)?;
            Some(TypeRef::List(Box::new(inner)))
        }
        cst::Type::NonNullType(non_null) => {
            // NonNullType wraps either a NamedType or a ListType
            let inner = if let Some(named) = non_null.named_type() {
                TypeRef::Named(Arc::from(named.name()?.text().as_str()))
            } else {
                let list = non_null.list_type()?;
                TypeRef::List(Box::new(extract_type_ref(&list.ty()?)?))
            };
            Some(TypeRef::NonNull(Box::new(inner)))
        }
    }
}

fn extract_deprecation(directives: Option<cst::Directives>) -> (bool, Option<Arc<str>>) {
    let Some(directives) = directives else {
        return (false, None);
    };

    for directive in directives.directives() {
        let is_deprecated = directive
            .name()
            .is_some_and(|name| name.text().as_str() == "deprecated");
        if !is_deprecated {
            continue;
        }

        let reason = directive
            .arguments()
            .into_iter()
            .flat_map(|args| args.arguments())
            .find_map(|arg| {
                if arg.name()?.text().as_str() != "reason" {
                    return None;
                }
                match arg.value()? {
                    cst::Value::StringValue(s) => Some(Arc::from(
                        s.syntax().text().to_string().trim().trim_matches('"'),
                    )),
                    _ => None,
                }
            });
        return (true, reason);
    }

    (false, None)
}

/// Description text without quotes, with each line trimmed
fn description_text(description: &cst::Description) -> Arc<str> {
    let raw = description.syntax().text().to_string();
    let unquoted = raw.trim().trim_matches('"');
    let lines: Vec<&str> = unquoted.lines().map(str::trim).collect();
    Arc::from(lines.join("\n").trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_display_keeps_wrappers() {
        let ty = TypeRef::NonNull(Box::new(TypeRef::List(Box::new(TypeRef::NonNull(
            Box::new(TypeRef::Named(Arc::from("Issue"))),
        )))));
        assert_eq!(ty.to_string(), "[Issue!]!");
        assert_eq!(ty.named_type(), "Issue");
        assert!(ty.is_list());
        assert!(ty.is_non_null());
    }

    #[test]
    fn test_nested_list_type_is_extracted() {
        let schema = parse_schema("type Query { grid: [[Int!]]! }").unwrap();
        let field = schema.query_type().unwrap().field("grid").unwrap();
        assert_eq!(field.type_ref.to_string(), "[[Int!]]!");
        assert_eq!(field.named_type(), "Int");
    }

    #[test]
    fn test_required_argument_detection() {
        let schema = parse_schema(
            "type Query { user(id: ID!, first: Int! = 10, after: String): String }",
        )
        .unwrap();
        let field = schema.query_type().unwrap().field("user").unwrap();
        let required: Vec<&str> = field
            .arguments
            .iter()
            .filter(|a| a.is_required())
            .map(|a| a.name.as_ref())
            .collect();
        assert_eq!(required, vec!["id"]);
        assert!(field.has_required_arguments());
        assert_eq!(field.arguments[1].default_value.as_deref(), Some("10"));
    }

    #[test]
    fn test_deprecation_reason_is_unquoted() {
        let schema = parse_schema(
            r#"type Query { old: String @deprecated(reason: "Use new") new: String }"#,
        )
        .unwrap();
        let query = schema.query_type().unwrap();
        let old = query.field("old").unwrap();
        assert!(old.is_deprecated);
        assert_eq!(old.deprecation_reason.as_deref(), Some("Use new"));
        assert!(!query.field("new").unwrap().is_deprecated);
    }

    #[test]
    fn test_block_description_is_trimmed() {
        let schema = parse_schema(
            "type Query {\n  \"\"\"\n  The current user.\n  \"\"\"\n  viewer: String\n}",
        )
        .unwrap();
        let viewer = schema.query_type().unwrap().field("viewer").unwrap();
        assert_eq!(viewer.description.as_deref(), Some("The current user."));
    }
}
