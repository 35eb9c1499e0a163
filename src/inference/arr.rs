use serde_json::Value;

/// What an array field looks like after descending through first elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Peeled<'v> {
    /// the field's own array has no elements
    Empty,
    /// an inner array (at `depth`) was empty, element type unknown
    EmptyInner { depth: usize },
    /// first non-array element, reached after `depth` array layers
    Element { first: &'v Value, depth: usize },
}

/// Walk `[[[x, ..], ..], ..]` down to `x`, looking only at first elements.
///
/// Iterative so that deeply nested arrays never grow the call stack.
pub fn peel(items: &[Value]) -> Peeled<'_> {
    let Some(mut first) = items.first() else {
        return Peeled::Empty;
    };
    let mut depth = 1;
    while let Value::Array(inner) = first {
        depth += 1;
        match inner.first() {
            Some(next) => first = next,
            None => return Peeled::EmptyInner { depth },
        }
    }
    Peeled::Element { first, depth }
}
