// Strongly-typed IR for codegen. No serde_json::Value here.
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldType {
    Int,
    Double,
    Bool,
    String,
    /// reference to a generated type
    Nested { name: String },
    /// `element` is never itself an `Array`; nesting is carried by `depth`
    Array { element: Box<FieldType>, depth: usize },
}

impl FieldType {
    pub fn array_of(element: FieldType, depth: usize) -> Self {
        debug_assert!(depth >= 1);
        debug_assert!(!matches!(element, FieldType::Array { .. }));
        FieldType::Array { element: Box::new(element), depth }
    }

    /// Name of the generated type this field points at, through any array layers.
    pub fn nested_name(&self) -> Option<&str> {
        match self {
            FieldType::Nested { name } => Some(name),
            FieldType::Array { element, .. } => element.nested_name(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub key: String,
    pub ty: FieldType,
    /// Inline mode only: the nested type discovered at this field, declared
    /// right after it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_decl: Option<Box<TypeDecl>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDecl {
    pub name: String,
    pub fields: Vec<Field>,      // traversal order
    /// field key → generated element type, for array-of-generated-type fields
    pub collection_hooks: IndexMap<String, String>,
    pub is_root: bool,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, is_root: bool) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            collection_hooks: IndexMap::new(),
            is_root,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Nesting {
    /// nested declarations live inside their parent's body
    Inline,
    /// nested declarations are flat siblings after the root
    Hoisted,
}

/// Output of one schema walk.
///
/// `types[0]` is always the root. In `Inline` mode it is the only top-level
/// entry and nested types hang off `Field::inline_decl`; in `Hoisted` mode the
/// remaining entries follow in breadth-first discovery order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub nesting: Nesting,
    pub types: Vec<TypeDecl>,
}

impl Model {
    pub fn root(&self) -> &TypeDecl {
        &self.types[0]
    }

    /// Every declared type, pre-order through inline declarations.
    pub fn all_types(&self) -> Vec<&TypeDecl> {
        fn visit<'a>(decl: &'a TypeDecl, out: &mut Vec<&'a TypeDecl>) {
            out.push(decl);
            for field in &decl.fields {
                if let Some(inner) = &field.inline_decl {
                    visit(inner, out);
                }
            }
        }
        let mut out = Vec::new();
        for decl in &self.types {
            visit(decl, &mut out);
        }
        out
    }
}
