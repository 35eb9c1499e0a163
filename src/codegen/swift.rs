//! Swift emitter: one `.swift` file, nested types inline or hoisted.
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::dialect::{aligned_entries, Dialect};
use super::{header, quoted, Emitter, GeneratedFile};
use crate::config::{Configuration, Framework};
use crate::inference::InferOptions;
use crate::ir::{Field, FieldType, Model, Nesting, TypeDecl};
use crate::layout::{indent, wrap_brackets};

pub struct SwiftCodegen;

#[derive(Debug, Clone, Copy)]
pub struct SwiftDialect {
    framework: Framework,
    confirms_marker_protocol: bool,
}

impl SwiftDialect {
    pub fn new(config: &Configuration) -> Self {
        Self {
            framework: config.framework_dialect,
            confirms_marker_protocol: config.confirms_marker_protocol,
        }
    }

    fn type_text(ty: &FieldType) -> String {
        match ty {
            FieldType::Int => "Int".to_string(),
            FieldType::Double => "Double".to_string(),
            FieldType::Bool => "Bool".to_string(),
            FieldType::String => "String".to_string(),
            FieldType::Nested { name } => name.clone(),
            FieldType::Array { element, depth } => wrap_brackets(&Self::type_text(element), *depth),
        }
    }
}

impl Dialect for SwiftDialect {
    fn declare_class(&self, name: &str, depth: usize) -> String {
        let tabs = indent(depth);
        match self.framework {
            Framework::None => format!("{tabs}class {name} {{\n"),
            Framework::YYModel if self.confirms_marker_protocol => {
                format!("{tabs}@objcMembers\n{tabs}class {name}: NSObject, YYModel {{\n")
            }
            Framework::YYModel | Framework::MJExtension => {
                format!("{tabs}@objcMembers\n{tabs}class {name}: NSObject {{\n")
            }
        }
    }

    fn declare_field(&self, field: &Field, depth: usize) -> Option<String> {
        let tabs = indent(depth);
        let key = &field.key;
        let line = match &field.ty {
            FieldType::Int => format!("{tabs}var {key}: Int = 0\n"),
            FieldType::Double => format!("{tabs}var {key}: Double = 0\n"),
            FieldType::Bool => format!("{tabs}var {key}: Bool = false\n"),
            other => format!("{tabs}var {key}: {}?\n", Self::type_text(other)),
        };
        Some(line)
    }

    fn declare_collection_hook(&self, hooks: &IndexMap<String, String>, depth: usize) -> Option<String> {
        if hooks.is_empty() {
            return None;
        }
        let signature = match self.framework {
            Framework::None => return None,
            Framework::YYModel => "static func modelContainerPropertyGenericClass() -> [String : Any]? {",
            Framework::MJExtension => "override static func mj_objectClassInArray() -> [AnyHashable : Any]! {",
        };
        let tabs = indent(depth);
        let entries: Vec<String> = hooks
            .iter()
            .map(|(key, ty)| format!("{} : {ty}.self", quoted(key)))
            .collect();
        let body = aligned_entries("return [", &entries, "]\n", &indent(depth + 1));
        Some(format!("{tabs}{signature}\n{body}{tabs}}}\n"))
    }
}

impl SwiftCodegen {
    fn render_type(dialect: &SwiftDialect, decl: &TypeDecl, depth: usize) -> String {
        let mut out = dialect.declare_class(&decl.name, depth);
        let last = decl.fields.len().saturating_sub(1);
        for (i, field) in decl.fields.iter().enumerate() {
            match dialect.declare_field(field, depth + 1) {
                Some(line) => out.push_str(&line),
                None => warn!(field = %field.key, "field has no Swift form, skipped"),
            }
            if let Some(inner) = &field.inline_decl {
                out.push('\n');
                out.push_str(&Self::render_type(dialect, inner, depth + 1));
                if i < last {
                    out.push('\n');
                }
            }
        }
        if let Some(hook) = dialect.declare_collection_hook(&decl.collection_hooks, depth + 1) {
            out.push('\n');
            out.push_str(&hook);
        }
        out.push_str(&indent(depth));
        out.push_str("}\n");
        out
    }
}

impl Emitter for SwiftCodegen {
    fn infer_options(&self, config: &Configuration) -> InferOptions {
        InferOptions {
            nesting: if config.use_inline_nested_types { Nesting::Inline } else { Nesting::Hoisted },
            max_array_depth: None,
        }
    }

    fn emit(&self, model: &Model, config: &Configuration) -> Vec<GeneratedFile> {
        let dialect = SwiftDialect::new(config);
        let file_name = format!("{}.swift", config.output_file_name);

        let mut out = header::banner(&file_name);
        out.push_str("import Foundation\n");
        for decl in &model.types {
            out.push('\n');
            out.push_str(&Self::render_type(&dialect, decl, 0));
        }
        debug!(file = %file_name, types = model.all_types().len(), "swift source rendered");
        vec![GeneratedFile::new(file_name, out)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(value: serde_json::Value, config: &Configuration) -> String {
        let emitter = SwiftCodegen;
        let inference = infer(&value, config, emitter.infer_options(config)).unwrap();
        let mut files = emitter.emit(&inference.model, config);
        assert_eq!(files.len(), 1);
        files.remove(0).contents
    }

    fn body(src: &str) -> &str {
        src.split_once("import Foundation\n").unwrap().1
    }

    fn named(name: &str) -> Configuration {
        Configuration::default().with_output_file_name(name)
    }

    #[test]
    fn primitives_plain_dialect() {
        let src = render(json!({"name": "a", "age": 7, "tags": ["x", "y"]}), &named("Person"));
        assert!(src.starts_with("//\n//  Person.swift\n"));
        assert_eq!(
            body(&src),
            "\nclass Person {\n\tvar name: String?\n\tvar age: Int = 0\n\tvar tags: [String]?\n}\n"
        );
    }

    #[test]
    fn hoisted_nested_type_is_a_sibling() {
        let src = render(json!({"user": {"id": 1}}), &named("Root"));
        assert_eq!(
            body(&src),
            "\nclass Root {\n\tvar user: User?\n}\n\nclass User {\n\tvar id: Int = 0\n}\n"
        );
    }

    #[test]
    fn inline_nested_type_follows_its_field() {
        let config = Configuration { use_inline_nested_types: true, ..named("Root") };
        let src = render(json!({"user": {"id": 1}, "ok": true}), &config);
        assert_eq!(
            body(&src),
            "\nclass Root {\n\
             \tvar user: User?\n\
             \n\
             \tclass User {\n\
             \t\tvar id: Int = 0\n\
             \t}\n\
             \n\
             \tvar ok: Bool = false\n\
             }\n"
        );
    }

    #[test]
    fn empty_object_still_closes() {
        let src = render(json!({}), &named("Empty"));
        assert_eq!(body(&src), "\nclass Empty {\n}\n");
    }

    #[test]
    fn nested_arrays_repeat_brackets() {
        let src = render(json!({"grid": [[1.5]], "cube": [[[1]]]}), &named("Root"));
        assert!(src.contains("\tvar grid: [[Double]]?\n"));
        assert!(src.contains("\tvar cube: [[[Int]]]?\n"));
    }

    #[test]
    fn yymodel_header_and_hook() {
        let config = Configuration {
            confirms_marker_protocol: true,
            ..named("Feed").with_framework(Framework::YYModel)
        };
        let src = render(json!({"items": [{"id": 1}], "tags": [{"t": "a"}]}), &config);
        assert_eq!(
            body(&src),
            "\n@objcMembers\nclass Feed: NSObject, YYModel {\n\
             \tvar items: [Items]?\n\
             \tvar tags: [Tags]?\n\
             \n\
             \tstatic func modelContainerPropertyGenericClass() -> [String : Any]? {\n\
             \t\treturn [\"items\" : Items.self,\n\
             \t\t        \"tags\" : Tags.self]\n\
             \t}\n\
             }\n\
             \n@objcMembers\nclass Items: NSObject, YYModel {\n\tvar id: Int = 0\n}\n\
             \n@objcMembers\nclass Tags: NSObject, YYModel {\n\tvar t: String?\n}\n"
        );
    }

    #[test]
    fn mjextension_hook() {
        let config = named("Feed").with_framework(Framework::MJExtension);
        let src = render(json!({"items": [{"id": 1}]}), &config);
        assert!(src.contains("@objcMembers\nclass Feed: NSObject {\n"));
        assert!(src.contains(
            "\toverride static func mj_objectClassInArray() -> [AnyHashable : Any]! {\n\t\treturn [\"items\" : Items.self]\n\t}\n"
        ));
    }

    #[test]
    fn plain_dialect_has_no_hook() {
        let src = render(json!({"items": [{"id": 1}]}), &named("Feed"));
        assert!(!src.contains("modelContainerPropertyGenericClass"));
        assert!(!src.contains("mj_objectClassInArray"));
    }

    #[test]
    fn inline_hook_is_indented_with_its_type() {
        let config = Configuration {
            use_inline_nested_types: true,
            ..named("Root").with_framework(Framework::YYModel)
        };
        let src = render(json!({"page": {"rows": [{"v": 1}]}}), &config);
        assert!(src.contains("\t\tstatic func modelContainerPropertyGenericClass() -> [String : Any]? {\n\t\t\treturn [\"rows\" : Rows.self]\n\t\t}\n\t}\n"));
        assert!(src.contains("\t\t@objcMembers\n\t\tclass Rows: NSObject {\n\t\t\tvar v: Int = 0\n\t\t}\n"));
    }

    #[test]
    fn output_is_idempotent() {
        let v = json!({"a": {"b": [{"c": 1}]}, "d": [[true]], "e": 2.5});
        let config = named("Root").with_framework(Framework::YYModel);
        assert_eq!(render(v.clone(), &config), render(v, &config));
    }
}
