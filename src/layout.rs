//! Indentation and array-bracket text as pure functions of a depth counter.

/// One tab per nesting level.
pub fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}

/// Opening and closing bracket runs for an array nested `depth` times.
pub fn brackets(depth: usize) -> (String, String) {
    ("[".repeat(depth), "]".repeat(depth))
}

/// Wrap `inner` in `depth` bracket pairs: `wrap_brackets("Int", 2) == "[[Int]]"`.
pub fn wrap_brackets(inner: &str, depth: usize) -> String {
    let (open, close) = brackets(depth);
    format!("{open}{inner}{close}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_is_tabs() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(3), "\t\t\t");
    }

    #[test]
    fn brackets_balance() {
        assert_eq!(brackets(0), (String::new(), String::new()));
        assert_eq!(wrap_brackets("Int", 1), "[Int]");
        assert_eq!(wrap_brackets("User", 3), "[[[User]]]");
    }
}
