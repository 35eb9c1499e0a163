use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Configuration;

/// Identifier shape accepted by both Swift and Objective-C without escaping.
static IDENTIFIER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex should be valid")
});

/// Uppercase the first character, keep the rest untouched.
pub fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generated type name for an object-valued field.
///
/// Pure in `(key, prefix, suffix, ignore_prefix)`; collisions between equal
/// keys are resolved later by [`super::registry::TypeRegistry`].
pub fn type_name(key: &str, config: &Configuration) -> String {
    let prefix = if config.ignore_prefix { "" } else { config.prefix.as_str() };
    format!("{prefix}{}{}", title_case(key), config.suffix)
}

pub fn is_identifier(key: &str) -> bool {
    IDENTIFIER_REGEX.is_match(key)
}
