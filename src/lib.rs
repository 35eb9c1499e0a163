//! json-fit: generate Swift / Objective-C model classes from a sample JSON object.
//!
//! ```text
//! JSON text ─parse─▶ Value ─infer─▶ ir::Model ─emit─▶ Vec<GeneratedFile> ─write─▶ disk
//! ```
//!
//! [`generate`] is pure; nothing touches the filesystem until
//! [`output::write_generation`] is called with a finished [`Generation`].
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod inference;
pub mod input;
pub mod ir;
pub mod jq_exec;
pub mod layout;
pub mod output;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

pub use codegen::GeneratedFile;
pub use config::{Configuration, Framework, Syntax};
pub use error::{Error, Result};
pub use inference::{Diagnostic, DiagnosticKind};

/// Everything one run produces: the files to write and what was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    pub files: Vec<GeneratedFile>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Infer and render model classes for `value` under `config`.
pub fn generate(value: &Value, config: &Configuration) -> Result<Generation> {
    config.validate()?;
    let emitter = codegen::emitter_for(config.output_file_syntax);
    let inference = inference::infer(value, config, emitter.infer_options(config))?;
    let files = emitter.emit(&inference.model, config);
    info!(
        name = %config.output_file_name,
        syntax = ?config.output_file_syntax,
        files = files.len(),
        skipped = inference.diagnostics.len(),
        "generated"
    );
    Ok(Generation { files, diagnostics: inference.diagnostics })
}

/// [`generate`] from JSON text. A non-object root is reported with the
/// input text exactly as given.
pub fn generate_from_str(text: &str, config: &Configuration) -> Result<Generation> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(Error::InvalidRootShape { input: text.to_string() });
    }
    generate(&value, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn swift_yields_one_file() {
        let generation = generate(&json!({"id": 1}), &Configuration::default()).unwrap();
        assert_eq!(generation.files.len(), 1);
        assert_eq!(generation.files[0].file_name, "Model.swift");
    }

    #[test]
    fn objc_yields_header_then_implementation() {
        let config = Configuration::default()
            .with_output_file_name("Feed")
            .with_syntax(Syntax::Objc);
        let generation = generate(&json!({"id": 1}), &config).unwrap();
        let names: Vec<_> = generation.files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, ["Feed.h", "Feed.m"]);
    }

    #[test]
    fn array_root_keeps_input_text() {
        let err = generate_from_str("[1, 2]", &Configuration::default()).unwrap_err();
        match err {
            Error::InvalidRootShape { input } => assert_eq!(input, "[1, 2]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = generate_from_str("{\"a\":", &Configuration::default()).unwrap_err();
        assert!(matches!(err, Error::JsonParse(_)));
    }

    #[test]
    fn invalid_config_is_rejected_before_walking() {
        let config = Configuration { max_depth: 0, ..Configuration::default() };
        assert!(matches!(generate(&json!({}), &config), Err(Error::Config { .. })));
    }

    #[test]
    fn diagnostics_are_returned() {
        let generation = generate(&json!({"a": [], "b": 1}), &Configuration::default()).unwrap();
        assert_eq!(generation.diagnostics.len(), 1);
        assert_eq!(generation.diagnostics[0].kind, DiagnosticKind::EmptyArray);
        assert!(generation.files[0].contents.contains("var b: Int = 0"));
    }
}
