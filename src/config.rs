//! Generation settings.
//!
//! A [`Configuration`] is read once (JSON file and/or CLI flags) and is then
//! immutable for the whole generation run.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Target surface syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    /// single `.swift` file
    #[default]
    Swift,
    /// `.h` declarations + `.m` definitions
    #[serde(alias = "objectivec", alias = "objective-c")]
    Objc,
}

/// Serialization-framework convention layered on the base syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    None,
    #[value(name = "yymodel")]
    YYModel,
    #[value(name = "mjextension")]
    MJExtension,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Root type name, also the output file stem.
    pub output_file_name: String,
    pub output_file_syntax: Syntax,
    pub framework_dialect: Framework,
    /// Add the framework's marker protocol to generated classes (YYModel).
    pub confirms_marker_protocol: bool,
    pub prefix: String,
    pub suffix: String,
    /// Leave `prefix` off nested type names.
    #[serde(alias = "ignorePrefixWhenNoSuffix")]
    pub ignore_prefix: bool,
    /// Swift only: declare nested types inside their parent.
    pub use_inline_nested_types: bool,
    /// Reproduce the old behavior where an empty array drops every field
    /// after it in the same object.
    pub legacy_empty_array_abort: bool,
    pub max_depth: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            output_file_name: "Model".to_string(),
            output_file_syntax: Syntax::Swift,
            framework_dialect: Framework::None,
            confirms_marker_protocol: false,
            prefix: String::new(),
            suffix: String::new(),
            ignore_prefix: false,
            use_inline_nested_types: false,
            legacy_empty_array_abort: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Configuration {
    pub fn from_json_str(source: &str) -> Result<Self> {
        Self::parse(source).map_err(Error::config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        Self::parse(&source).map_err(|message| Error::config(format!("{}: {message}", path.display())))
    }

    // Deserialize with the JSON path of the offending key in the message.
    fn parse(source: &str) -> std::result::Result<Self, String> {
        let de = &mut serde_json::Deserializer::from_str(source);
        serde_path_to_error::deserialize(de).map_err(|err| {
            let path = err.path().to_string();
            format!("at JSON path {path} → {}", err.into_inner())
        })
    }

    #[must_use]
    pub fn with_output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }

    #[must_use]
    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.output_file_syntax = syntax;
        self
    }

    #[must_use]
    pub fn with_framework(mut self, framework: Framework) -> Self {
        self.framework_dialect = framework;
        self
    }

    /// Reject settings that cannot produce a usable file.
    pub fn validate(&self) -> Result<()> {
        if self.output_file_name.trim().is_empty() {
            return Err(Error::config("outputFileName must not be empty"));
        }
        if self.max_depth == 0 {
            return Err(Error::config("maxDepth must be at least 1"));
        }
        Ok(())
    }
}
