use indexmap::IndexMap;

use crate::ir::Field;

/// Framework/syntax strategy used by the emitters.
///
/// `depth` is the nesting level of the produced text; implementations turn it
/// into indentation with [`crate::layout::indent`].
pub trait Dialect {
    /// Opening of a class declaration, newline-terminated.
    fn declare_class(&self, name: &str, depth: usize) -> String;

    /// One property declaration, newline-terminated, or `None` when the
    /// syntax has no way to express the field.
    fn declare_field(&self, field: &Field, depth: usize) -> Option<String>;

    /// Element-class lookup for array-of-generated-type fields
    /// (`hooks`: field key → type name). `None` when the framework needs none
    /// or there is nothing to map.
    fn declare_collection_hook(&self, hooks: &IndexMap<String, String>, depth: usize) -> Option<String>;
}

/// `head` + one `key : value` entry per line, continuation lines aligned under
/// the first entry, then `tail`.
pub(crate) fn aligned_entries(head: &str, entries: &[String], tail: &str, indent: &str) -> String {
    let pad = " ".repeat(head.chars().count());
    let mut out = format!("{indent}{head}");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
            out.push_str(indent);
            out.push_str(&pad);
        }
        out.push_str(entry);
    }
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_line_up() {
        let entries = vec!["\"a\" : A.self".to_string(), "\"b\" : B.self".to_string()];
        assert_eq!(
            aligned_entries("return [", &entries, "]\n", "\t"),
            "\treturn [\"a\" : A.self,\n\t        \"b\" : B.self]\n"
        );
    }
}
