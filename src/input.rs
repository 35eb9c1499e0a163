//! JSON document acquisition: paths, quoted glob patterns, or `-` for stdin,
//! optionally narrowed with a JSON pointer and/or a jq filter.
use std::io::Read;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// One parsed input, ready for a generation run.
#[derive(Debug, Clone)]
pub struct Document {
    /// path as given, or `<stdin>`
    pub label: String,
    /// file stem, used as a default type name when several inputs are given
    pub stem: Option<String>,
    pub value: Value,
}

#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    /// JSON Pointer into each document, e.g. `/data/items/0`
    pub json_pointer: Option<&'a str>,
    /// jq filter applied after the pointer; must yield one value
    pub jq_expr: Option<&'a str>,
}

pub const STDIN: &str = "-";

/// Resolve `patterns` and parse every matched file.
pub fn load_documents(patterns: &[String], selection: &Selection<'_>) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for pattern in patterns {
        if pattern == STDIN {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| Error::io("<stdin>", e))?;
            documents.push(parse_document("<stdin>".to_string(), None, &source, selection)?);
            continue;
        }
        for path in resolve_file_path_patterns([pattern])? {
            let source = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            let stem = path.file_stem().map(|s| s.to_string_lossy().to_string());
            documents.push(parse_document(path.display().to_string(), stem, &source, selection)?);
        }
    }
    Ok(documents)
}

pub fn parse_document(
    label: String,
    stem: Option<String>,
    source: &str,
    selection: &Selection<'_>,
) -> Result<Document> {
    let mut value = serde_json::from_str::<Value>(source)
        .map_err(|error| Error::input(format!("failed to parse JSON ({label}): {error}")))?;

    if let Some(pointer) = selection.json_pointer {
        value = value
            .pointer(pointer)
            .cloned()
            .ok_or_else(|| Error::input(format!("JSON pointer `{pointer}` matched nothing in {label}")))?;
    }
    if let Some(jq_expr) = selection.jq_expr {
        value = crate::jq_exec::run_jaq_single(jq_expr, &value)
            .map_err(|error| Error::jq(format!("{label}: {error:#}")))?;
    }
    debug!(input = %label, "document loaded");
    Ok(Document { label, stem, value })
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if !has_glob_chars(pattern) {
            out.push(PathBuf::from(pattern));
            continue;
        }
        let entries = glob::glob(pattern)
            .map_err(|error| Error::input(format!("bad glob pattern `{pattern}`: {error}")))?;
        let before = out.len();
        for entry in entries {
            let path = entry.map_err(|error| Error::io(error.path().to_path_buf(), error.into_error()))?;
            out.push(path);
        }
        if out.len() == before {
            // an explicit glob that matched nothing is almost always a typo
            return Err(Error::input(format!("glob pattern matched no files: {pattern}")));
        }
    }
    Ok(out)
}

/// Stable default type name for a file: `user-feed.json` → `User_feed`.
pub fn type_name_from_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let cleaned = if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{cleaned}")
    } else {
        cleaned
    };
    crate::inference::name::title_case(&cleaned)
}
