//! Objective-C emitter: `.h` declarations and `.m` definitions.
//!
//! Both artifacts list the same types in the same order, root first. Nested
//! types are forward-declared with `@class` so property types resolve no
//! matter where their `@interface` lands.
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::dialect::{aligned_entries, Dialect};
use super::{header, quoted, Emitter, GeneratedFile};
use crate::config::{Configuration, Framework};
use crate::inference::InferOptions;
use crate::ir::{Field, FieldType, Model, Nesting};

pub struct ObjcCodegen;

#[derive(Debug, Clone, Copy)]
pub struct ObjcDialect {
    framework: Framework,
    confirms_marker_protocol: bool,
}

impl ObjcDialect {
    pub fn new(config: &Configuration) -> Self {
        Self {
            framework: config.framework_dialect,
            confirms_marker_protocol: config.confirms_marker_protocol,
        }
    }

    /// Extra `#import` lines the framework needs in the header.
    fn imports(&self) -> &'static str {
        match self.framework {
            Framework::YYModel if self.confirms_marker_protocol => "#import <YYKit/NSObject+YYModel.h>\n",
            Framework::MJExtension => "#import <MJExtension/MJExtension.h>\n",
            _ => "",
        }
    }

    fn element_text(element: &FieldType) -> Option<String> {
        match element {
            FieldType::Int | FieldType::Double | FieldType::Bool => Some("NSNumber *".to_string()),
            FieldType::String => Some("NSString *".to_string()),
            FieldType::Nested { name } => Some(format!("{name} *")),
            FieldType::Array { .. } => None,
        }
    }
}

impl Dialect for ObjcDialect {
    fn declare_class(&self, name: &str, _depth: usize) -> String {
        match self.framework {
            Framework::YYModel if self.confirms_marker_protocol => {
                format!("@interface {name} : NSObject<YYModel>\n")
            }
            _ => format!("@interface {name} : NSObject\n"),
        }
    }

    fn declare_field(&self, field: &Field, _depth: usize) -> Option<String> {
        let key = &field.key;
        let line = match &field.ty {
            FieldType::Int => format!("@property (nonatomic, assign) NSInteger {key};\n"),
            FieldType::Double => format!("@property (nonatomic, assign) CGFloat {key};\n"),
            FieldType::Bool => format!("@property (nonatomic, assign) BOOL {key};\n"),
            FieldType::String => format!("@property (nonatomic, copy) NSString *{key};\n"),
            FieldType::Nested { name } => format!("@property (nonatomic, strong) {name} *{key};\n"),
            FieldType::Array { element, depth: 1 } => {
                let element = Self::element_text(element)?;
                format!("@property (nonatomic, strong) NSArray<{element}> *{key};\n")
            }
            FieldType::Array { .. } => return None,
        };
        Some(line)
    }

    fn declare_collection_hook(&self, hooks: &IndexMap<String, String>, _depth: usize) -> Option<String> {
        if hooks.is_empty() {
            return None;
        }
        let signature = match self.framework {
            Framework::None => return None,
            Framework::YYModel => "+ (NSDictionary<NSString *,id> *)modelContainerPropertyGenericClass {",
            Framework::MJExtension => "+ (NSDictionary *)mj_objectClassInArray {",
        };
        let entries: Vec<String> = hooks
            .iter()
            .map(|(key, ty)| format!("@{} : {ty}.class", quoted(key)))
            .collect();
        let body = aligned_entries("return @{", &entries, "};\n", "\t");
        Some(format!("{signature}\n{body}}}\n"))
    }
}

impl Emitter for ObjcCodegen {
    fn infer_options(&self, config: &Configuration) -> InferOptions {
        if config.use_inline_nested_types {
            debug!("objective-c has no nested classes, hoisting instead");
        }
        InferOptions {
            nesting: Nesting::Hoisted,
            max_array_depth: Some(1),
        }
    }

    fn emit(&self, model: &Model, config: &Configuration) -> Vec<GeneratedFile> {
        let dialect = ObjcDialect::new(config);
        let name = &config.output_file_name;
        let decl_name = format!("{name}.h");
        let def_name = format!("{name}.m");

        // declaration artifact
        let mut h = header::banner(&decl_name);
        h.push_str("#import <UIKit/UIKit.h>\n");
        h.push_str(dialect.imports());
        h.push_str("\nNS_ASSUME_NONNULL_BEGIN\n\n");
        let nested: Vec<&str> = model.types.iter().skip(1).map(|t| t.name.as_str()).collect();
        if !nested.is_empty() {
            h.push_str(&format!("@class {};\n\n", nested.join(", ")));
        }

        // definition artifact
        let mut m = header::banner(&def_name);
        m.push_str(&format!("#import {}\n", quoted(&decl_name)));

        for decl in &model.types {
            h.push_str(&dialect.declare_class(&decl.name, 0));
            h.push('\n');
            for field in &decl.fields {
                match dialect.declare_field(field, 0) {
                    Some(line) => h.push_str(&line),
                    None => warn!(
                        path = %format!("{}.{}", decl.name, field.key),
                        "field has no Objective-C form, skipped"
                    ),
                }
            }
            h.push_str("\n@end\n\n");

            m.push_str(&format!("\n@implementation {}\n", decl.name));
            if let Some(hook) = dialect.declare_collection_hook(&decl.collection_hooks, 0) {
                m.push('\n');
                m.push_str(&hook);
                m.push('\n');
            }
            m.push_str("@end\n");
        }
        h.push_str("NS_ASSUME_NONNULL_END\n");

        debug!(header = %decl_name, implementation = %def_name, types = model.types.len(), "objective-c sources rendered");
        vec![GeneratedFile::new(decl_name, h), GeneratedFile::new(def_name, m)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{infer, DiagnosticKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(value: serde_json::Value, config: &Configuration) -> (String, String) {
        let emitter = ObjcCodegen;
        let inference = infer(&value, config, emitter.infer_options(config)).unwrap();
        let mut files = emitter.emit(&inference.model, config);
        assert_eq!(files.len(), 2);
        let m = files.pop().unwrap();
        let h = files.pop().unwrap();
        assert!(h.file_name.ends_with(".h"));
        assert!(m.file_name.ends_with(".m"));
        (h.contents, m.contents)
    }

    fn after<'a>(src: &'a str, marker: &str) -> &'a str {
        src.split_once(marker).unwrap().1
    }

    fn named(name: &str) -> Configuration {
        Configuration::default().with_output_file_name(name)
    }

    #[test]
    fn plain_header_and_implementation() {
        let (h, m) = render(
            json!({"name": "a", "age": 7, "score": 0.5, "ok": false, "user": {"id": 1}}),
            &named("Person"),
        );
        assert!(h.starts_with("//\n//  Person.h\n"));
        assert_eq!(
            after(&h, "//\n\n"),
            "#import <UIKit/UIKit.h>\n\
             \n\
             NS_ASSUME_NONNULL_BEGIN\n\
             \n\
             @class User;\n\
             \n\
             @interface Person : NSObject\n\
             \n\
             @property (nonatomic, copy) NSString *name;\n\
             @property (nonatomic, assign) NSInteger age;\n\
             @property (nonatomic, assign) CGFloat score;\n\
             @property (nonatomic, assign) BOOL ok;\n\
             @property (nonatomic, strong) User *user;\n\
             \n\
             @end\n\
             \n\
             @interface User : NSObject\n\
             \n\
             @property (nonatomic, assign) NSInteger id;\n\
             \n\
             @end\n\
             \n\
             NS_ASSUME_NONNULL_END\n"
        );
        assert!(m.starts_with("//\n//  Person.m\n"));
        assert_eq!(
            after(&m, "//\n\n"),
            "#import \"Person.h\"\n\
             \n\
             @implementation Person\n\
             @end\n\
             \n\
             @implementation User\n\
             @end\n"
        );
    }

    #[test]
    fn arrays_map_to_typed_collections() {
        let (h, _) = render(
            json!({"ids": [1], "ratios": [0.5], "flags": [true], "names": ["a"], "users": [{"id": 1}]}),
            &named("Root"),
        );
        assert!(h.contains("@property (nonatomic, strong) NSArray<NSNumber *> *ids;\n"));
        assert!(h.contains("@property (nonatomic, strong) NSArray<NSNumber *> *ratios;\n"));
        assert!(h.contains("@property (nonatomic, strong) NSArray<NSNumber *> *flags;\n"));
        assert!(h.contains("@property (nonatomic, strong) NSArray<NSString *> *names;\n"));
        assert!(h.contains("@property (nonatomic, strong) NSArray<Users *> *users;\n"));
    }

    #[test]
    fn two_dimensional_arrays_are_skipped_with_a_diagnostic() {
        let config = named("Root");
        let emitter = ObjcCodegen;
        let value = json!({"grid": [[1]], "n": 1});
        let inference = infer(&value, &config, emitter.infer_options(&config)).unwrap();
        assert_eq!(
            inference.diagnostics[0].kind,
            DiagnosticKind::UnsupportedShape { depth: 2, max: 1 }
        );
        let files = emitter.emit(&inference.model, &config);
        assert!(!files[0].contents.contains("grid"));
        assert!(files[0].contents.contains("NSInteger n;"));
    }

    #[test]
    fn yymodel_protocol_import_and_hook() {
        let config = Configuration {
            confirms_marker_protocol: true,
            ..named("Feed").with_framework(Framework::YYModel)
        };
        let (h, m) = render(json!({"items": [{"id": 1}], "links": [{"url": "u"}]}), &config);
        assert!(h.contains("#import <UIKit/UIKit.h>\n#import <YYKit/NSObject+YYModel.h>\n\nNS_ASSUME_NONNULL_BEGIN\n"));
        assert!(h.contains("@class Items, Links;\n"));
        assert!(h.contains("@interface Feed : NSObject<YYModel>\n"));
        assert!(h.contains("@interface Items : NSObject<YYModel>\n"));
        assert_eq!(
            after(&m, "#import \"Feed.h\"\n"),
            "\n@implementation Feed\n\
             \n\
             + (NSDictionary<NSString *,id> *)modelContainerPropertyGenericClass {\n\
             \treturn @{@\"items\" : Items.class,\n\
             \t         @\"links\" : Links.class};\n\
             }\n\
             \n\
             @end\n\
             \n@implementation Items\n@end\n\
             \n@implementation Links\n@end\n"
        );
    }

    #[test]
    fn yymodel_without_protocol_is_plain_nsobject() {
        let config = named("Feed").with_framework(Framework::YYModel);
        let (h, m) = render(json!({"items": [{"id": 1}]}), &config);
        assert!(!h.contains("YYKit"));
        assert!(h.contains("@interface Feed : NSObject\n"));
        // the hook is still needed at runtime
        assert!(m.contains("modelContainerPropertyGenericClass"));
    }

    #[test]
    fn mjextension_import_and_hook() {
        let config = named("Feed").with_framework(Framework::MJExtension);
        let (h, m) = render(json!({"items": [{"id": 1}]}), &config);
        assert!(h.contains("#import <MJExtension/MJExtension.h>\n"));
        assert!(m.contains("+ (NSDictionary *)mj_objectClassInArray {\n\treturn @{@\"items\" : Items.class};\n}\n"));
    }

    #[test]
    fn root_comes_first_in_both_artifacts() {
        let (h, m) = render(json!({"a": {"b": {"c": 1}}, "d": {"e": 1}}), &named("Root"));
        let h_order: Vec<&str> = h
            .lines()
            .filter_map(|l| l.strip_prefix("@interface "))
            .map(|l| l.split(' ').next().unwrap())
            .collect();
        let m_order: Vec<&str> = m
            .lines()
            .filter_map(|l| l.strip_prefix("@implementation "))
            .collect();
        assert_eq!(h_order, vec!["Root", "A", "D", "B"]);
        assert_eq!(h_order, m_order);
    }

    #[test]
    fn inline_setting_is_ignored() {
        let config = Configuration { use_inline_nested_types: true, ..named("Root") };
        let (h, _) = render(json!({"user": {"id": 1}}), &config);
        assert!(h.contains("@interface User : NSObject\n"));
    }

    #[test]
    fn empty_object() {
        let (h, m) = render(json!({}), &named("Empty"));
        assert!(!h.contains("@class"));
        assert!(h.contains("@interface Empty : NSObject\n\n\n@end\n\nNS_ASSUME_NONNULL_END\n"));
        assert!(m.ends_with("@implementation Empty\n@end\n"));
    }
}
