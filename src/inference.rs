//! Schema walker.
//!
//! Walks one parsed JSON object and builds the [`Model`] the emitters render:
//! - every field is classified as Int / Double / Bool / String / nested
//!   type / array of those;
//! - arrays are assumed homogeneous, only the first element is inspected;
//! - nested objects become generated types, declared inline (recursion) or
//!   hoisted (breadth-first worklist + [`TypeRegistry`] uniqueness pass);
//! - fields the target cannot express are reported as [`Diagnostic`]s and
//!   skipped, the run carries on.
pub mod arr;
pub mod name;
pub mod num;
pub mod obj;
pub mod registry;

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::ir::{Field, FieldType, Model, Nesting, TypeDecl};

pub use arr::Peeled;
pub use obj::ShapeRules;
pub use registry::TypeRegistry;

// ------------------------------- Options --------------------------------- //

/// What the chosen emitter can express; set by the emitter, not the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferOptions {
    pub nesting: Nesting,
    /// deepest array nesting the target syntax supports (`None` = unbounded)
    pub max_array_depth: Option<usize>,
}

// ----------------------------- Diagnostics -------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// empty array, element type unknown; the field is skipped
    EmptyArray,
    /// legacy mode: an empty array dropped every later field of its object
    FieldsDropped { dropped: Vec<String> },
    /// array nested deeper than the target supports
    UnsupportedShape { depth: usize, max: usize },
    /// first array element is null or an empty array
    UntypedArray,
    /// key is not a valid identifier in the target language (still emitted)
    InvalidIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// dotted path from the root type, e.g. `Feed.items.tags`
    pub path: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::EmptyArray => {
                write!(f, "{}: empty array, element type unknown; field skipped", self.path)
            }
            DiagnosticKind::FieldsDropped { dropped } => write!(
                f,
                "{}: empty array ends the object; dropped {}",
                self.path,
                if dropped.is_empty() { "nothing".to_string() } else { dropped.join(", ") }
            ),
            DiagnosticKind::UnsupportedShape { depth, max } => write!(
                f,
                "{}: {depth}-dimensional arrays are not supported (max {max}); field skipped",
                self.path
            ),
            DiagnosticKind::UntypedArray => {
                write!(f, "{}: first array element has no type; field skipped", self.path)
            }
            DiagnosticKind::InvalidIdentifier => {
                write!(f, "{}: key is not a valid identifier", self.path)
            }
        }
    }
}

// ------------------------------- Walker ----------------------------------- //

/// Result of one walk: the model plus everything that was skipped on the way.
#[derive(Debug, Clone, Serialize)]
pub struct Inference {
    pub model: Model,
    pub diagnostics: Vec<Diagnostic>,
}

struct Pending<'v> {
    name: String,
    body: &'v Map<String, Value>,
    depth: usize,
    path: String,
}

struct Walker<'c, 'v> {
    config: &'c Configuration,
    options: InferOptions,
    rules: ShapeRules,
    /// hoisted: the single flat namespace
    registry: TypeRegistry,
    /// inline: one namespace per enclosing type body, innermost last
    scopes: Vec<TypeRegistry>,
    worklist: VecDeque<Pending<'v>>,
    diagnostics: Vec<Diagnostic>,
}

/// Infer the type model of `root`, which must be a JSON object.
pub fn infer(root: &Value, config: &Configuration, options: InferOptions) -> Result<Inference> {
    let Value::Object(map) = root else {
        return Err(Error::invalid_root(root));
    };
    let root_name = config.output_file_name.as_str();

    let mut walker = Walker {
        config,
        options,
        rules: ShapeRules {
            empty_array_aborts: config.legacy_empty_array_abort,
            max_array_depth: options.max_array_depth,
        },
        registry: TypeRegistry::new(),
        scopes: Vec::new(),
        worklist: VecDeque::new(),
        diagnostics: Vec::new(),
    };
    walker.registry.claim(root_name, &obj::shape_signature(map, &walker.rules));

    let mut types = vec![walker.walk_object(root_name, map, true, 1, root_name)?];
    while let Some(next) = walker.worklist.pop_front() {
        types.push(walker.walk_object(&next.name, next.body, false, next.depth, &next.path)?);
    }
    debug!(types = types.len(), skipped = walker.diagnostics.len(), "schema walk finished");

    Ok(Inference {
        model: Model { nesting: options.nesting, types },
        diagnostics: walker.diagnostics,
    })
}

impl<'c, 'v> Walker<'c, 'v> {
    fn report(&mut self, path: &str, kind: DiagnosticKind) {
        let diagnostic = Diagnostic { path: path.to_string(), kind };
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn walk_object(
        &mut self,
        name: &str,
        map: &'v Map<String, Value>,
        is_root: bool,
        depth: usize,
        path: &str,
    ) -> Result<TypeDecl> {
        if depth > self.config.max_depth {
            return Err(Error::TooDeeplyNested {
                path: path.to_string(),
                limit: self.config.max_depth,
            });
        }
        let scoped = self.options.nesting == Nesting::Inline;
        if scoped {
            self.scopes.push(TypeRegistry::new());
        }
        let decl = self.walk_fields(name, map, is_root, depth, path);
        if scoped {
            self.scopes.pop();
        }
        decl
    }

    fn walk_fields(
        &mut self,
        name: &str,
        map: &'v Map<String, Value>,
        is_root: bool,
        depth: usize,
        path: &str,
    ) -> Result<TypeDecl> {
        let mut decl = TypeDecl::new(name, is_root);
        for (index, (key, value)) in map.iter().enumerate() {
            let field_path = format!("{path}.{key}");
            let field = match value {
                Value::Null => {
                    debug!(path = %field_path, "null value, field dropped");
                    None
                }
                Value::Bool(_) => Some(plain(key, FieldType::Bool)),
                Value::Number(n) => Some(plain(key, num::classify(n))),
                Value::String(_) => Some(plain(key, FieldType::String)),
                Value::Object(body) => {
                    let (type_name, inline_decl) = self.nest(key, body, depth, &field_path)?;
                    Some(Field {
                        key: key.clone(),
                        ty: FieldType::Nested { name: type_name },
                        inline_decl,
                    })
                }
                Value::Array(items) => match arr::peel(items) {
                    Peeled::Empty if self.config.legacy_empty_array_abort => {
                        let dropped = map.keys().skip(index + 1).cloned().collect();
                        self.report(&field_path, DiagnosticKind::FieldsDropped { dropped });
                        break;
                    }
                    Peeled::Empty => {
                        self.report(&field_path, DiagnosticKind::EmptyArray);
                        None
                    }
                    Peeled::EmptyInner { .. } => {
                        self.report(&field_path, DiagnosticKind::UntypedArray);
                        None
                    }
                    Peeled::Element { first, depth: array_depth } => {
                        self.array_field(&mut decl, key, first, array_depth, depth, &field_path)?
                    }
                },
            };
            if let Some(field) = field {
                if !name::is_identifier(key) {
                    self.report(&field_path, DiagnosticKind::InvalidIdentifier);
                }
                decl.fields.push(field);
            }
        }
        Ok(decl)
    }

    fn array_field(
        &mut self,
        decl: &mut TypeDecl,
        key: &str,
        first: &'v Value,
        array_depth: usize,
        depth: usize,
        path: &str,
    ) -> Result<Option<Field>> {
        if let Some(max) = self.options.max_array_depth {
            if array_depth > max {
                self.report(path, DiagnosticKind::UnsupportedShape { depth: array_depth, max });
                return Ok(None);
            }
        }
        let (element, inline_decl) = match first {
            Value::Bool(_) => (FieldType::Bool, None),
            Value::Number(n) => (num::classify(n), None),
            Value::String(_) => (FieldType::String, None),
            Value::Object(body) => {
                let (type_name, inline_decl) = self.nest(key, body, depth, path)?;
                decl.collection_hooks.insert(key.to_string(), type_name.clone());
                (FieldType::Nested { name: type_name }, inline_decl)
            }
            Value::Null | Value::Array(_) => {
                self.report(path, DiagnosticKind::UntypedArray);
                return Ok(None);
            }
        };
        Ok(Some(Field {
            key: key.to_string(),
            ty: FieldType::array_of(element, array_depth),
            inline_decl,
        }))
    }

    /// Name a nested object and either expand it now (inline) or queue it.
    ///
    /// Inline types are claimed in the enclosing body's scope, so siblings
    /// never redeclare a name; a repeated sibling shape is declared once.
    fn nest(
        &mut self,
        key: &str,
        body: &'v Map<String, Value>,
        depth: usize,
        path: &str,
    ) -> Result<(String, Option<Box<TypeDecl>>)> {
        let base = name::type_name(key, self.config);
        let shape = obj::shape_signature(body, &self.rules);
        let claim = match self.options.nesting {
            Nesting::Inline => match self.scopes.last_mut() {
                Some(scope) => scope.claim(&base, &shape),
                None => self.registry.claim(&base, &shape),
            },
            Nesting::Hoisted => self.registry.claim(&base, &shape),
        };
        if claim.name != base {
            debug!(path, from = %base, to = %claim.name, "type name disambiguated");
        }
        if !claim.fresh {
            debug!(path, name = %claim.name, "reusing generated type");
            return Ok((claim.name, None));
        }
        match self.options.nesting {
            Nesting::Inline => {
                let inner = self.walk_object(&claim.name, body, false, depth + 1, path)?;
                Ok((claim.name, Some(Box::new(inner))))
            }
            Nesting::Hoisted => {
                self.worklist.push_back(Pending {
                    name: claim.name.clone(),
                    body,
                    depth: depth + 1,
                    path: path.to_string(),
                });
                Ok((claim.name, None))
            }
        }
    }
}

fn plain(key: &str, ty: FieldType) -> Field {
    Field { key: key.to_string(), ty, inline_decl: None }
}

// ------------------------------- Tests ------------------------------------ //
