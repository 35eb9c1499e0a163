//! Source emission: [`Model`] → named text files.
//!
//! Each target syntax is an [`Emitter`]; framework-specific text comes from a
//! [`dialect::Dialect`] strategy so the emitters never branch on the framework.
pub mod dialect;
pub mod header;
pub mod objc;
pub mod swift;

use serde::Serialize;

use crate::config::{Configuration, Syntax};
use crate::inference::InferOptions;
use crate::ir::Model;

pub use objc::ObjcCodegen;
pub use swift::SwiftCodegen;

/// One output artifact, written verbatim as `<dir>/<file_name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub file_name: String,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }
}

pub trait Emitter {
    /// How the walker should shape the model for this syntax.
    fn infer_options(&self, config: &Configuration) -> InferOptions;

    /// Render every artifact. Pure: the same model and config give the same bytes.
    fn emit(&self, model: &Model, config: &Configuration) -> Vec<GeneratedFile>;
}

pub fn emitter_for(syntax: Syntax) -> Box<dyn Emitter + Send + Sync> {
    match syntax {
        Syntax::Swift => Box::new(SwiftCodegen),
        Syntax::Objc => Box::new(ObjcCodegen),
    }
}

/// Quote `s` as a double-quoted string literal (same escapes in both syntaxes).
pub(crate) fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
