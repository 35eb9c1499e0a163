use serde_json::Number;

use crate::ir::FieldType;

/// Int when the literal was written as an integer, Double otherwise.
///
/// `1.0` stays a Double even though it is integral; only the parsed
/// representation matters.
pub fn classify(n: &Number) -> FieldType {
    if n.is_i64() || n.is_u64() {
        FieldType::Int
    } else {
        FieldType::Double
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Number {
        serde_json::from_str(src).unwrap()
    }

    #[test]
    fn integers_and_floats() {
        assert_eq!(classify(&parse("7")), FieldType::Int);
        assert_eq!(classify(&parse("-7")), FieldType::Int);
        assert_eq!(classify(&parse("18446744073709551615")), FieldType::Int);
        assert_eq!(classify(&parse("7.5")), FieldType::Double);
        assert_eq!(classify(&parse("1.0")), FieldType::Double);
        assert_eq!(classify(&parse("1e3")), FieldType::Double);
    }
}
