//! Answer comparison rules.
//!
//! These are the same rules the generated drivers apply at run time, evaluated here over canonical values so
//! tooling can judge an answer without compiling anything.
//!
//! ## Notes
//! - Floating values are equal when literally equal, or when `|expected - actual| <= 1e-9 * max(1, |expected|)`.
//! - Arrays must have equal length; elements are then compared pairwise with the scalar rule, stopping at the first
//!   mismatch.
//! - Every other scalar uses plain value equality (strings by content, never by identity).

use crate::types::DataType;
use crate::values::{split_elements, strip_braces, unquote_c};

/// Relative tolerance applied to floating point answers.
pub const DOUBLE_TOLERANCE: f64 = 1e-9;

/// Compare two floating values with the relative tolerance.
///
/// ## Examples
/// ```rust
/// use kawigi_core::doubles_equal;
///
/// assert!(doubles_equal(1.0, 1.0000000001));
/// assert!(!doubles_equal(1.0, 1.1));
/// assert!(doubles_equal(f64::NAN, f64::NAN));
/// ```
pub fn doubles_equal(expected: f64, actual: f64) -> bool {
    if expected == actual || (expected.is_nan() && actual.is_nan()) {
        return true;
    }
    (actual - expected).abs() <= DOUBLE_TOLERANCE * 1.0f64.max(expected.abs())
}

/// Compare an actual canonical value against the expected one for the given type.
///
/// ## Parameters
/// - `actual`: the value produced by the solution.
/// - `expected`: the reference answer.
/// - `ty`: the declared return type.
///
/// ## Returns
/// - `true` if the values are considered equal under the rules above.
pub fn compare(actual: &str, expected: &str, ty: DataType) -> bool {
    if ty.is_array() {
        let actual = split_elements(strip_braces(actual));
        let expected = split_elements(strip_braces(expected));
        if actual.len() != expected.len() {
            return false;
        }
        return actual
            .iter()
            .zip(expected.iter())
            .all(|(a, e)| scalar_equal(&unquote_element(a, ty), &unquote_element(e, ty), ty.scalar()));
    }
    scalar_equal(actual, expected, ty)
}

fn unquote_element(element: &str, ty: DataType) -> String {
    if ty.is_string() { unquote_c(element) } else { element.to_string() }
}

fn scalar_equal(actual: &str, expected: &str, scalar: DataType) -> bool {
    if actual == expected {
        return true;
    }
    match scalar {
        DataType::String => false,
        DataType::Double => match (actual.trim().parse::<f64>(), expected.trim().parse::<f64>()) {
            (Ok(a), Ok(e)) => doubles_equal(e, a),
            _ => false,
        },
        DataType::Integer | DataType::Long => match (actual.trim().parse::<i64>(), expected.trim().parse::<i64>()) {
            (Ok(a), Ok(e)) => a == e,
            _ => actual.trim() == expected.trim(),
        },
        DataType::Boolean => actual.trim().eq_ignore_ascii_case(expected.trim()),
        _ => unreachable!("INVARIANT: scalar_equal called with an array type"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_tolerance() {
        assert!(compare("1.0000000001", "1.0", DataType::Double));
        assert!(!compare("1.1", "1.0", DataType::Double));
        assert!(compare("1e12", "1000000000001", DataType::Double));
        assert!(!compare("abc", "1.0", DataType::Double));
    }

    #[test]
    fn test_double_nan_is_literally_equal() {
        assert!(compare("NaN", "NaN", DataType::Double));
    }

    #[test]
    fn test_integer_arrays() {
        assert!(compare("{1,2,3}", "{1, 2, 3}", DataType::IntegerArray));
        assert!(!compare("{1,2}", "{1,2,3}", DataType::IntegerArray));
        assert!(!compare("{1,2,4}", "{1,2,3}", DataType::IntegerArray));
        assert!(compare("{}", "{ }", DataType::IntegerArray));
    }

    #[test]
    fn test_double_arrays_use_tolerance() {
        assert!(compare("{0.3333333333, 2}", "{0.33333333333,2.0}", DataType::DoubleArray));
    }

    #[test]
    fn test_strings_compare_by_content() {
        assert!(compare("abc", "abc", DataType::String));
        assert!(!compare("abc ", "abc", DataType::String));
        assert!(compare(r#"{"a,b", "c"}"#, r#"{"a,b","c"}"#, DataType::StringArray));
        assert!(!compare(r#"{"a"}"#, r#"{"b"}"#, DataType::StringArray));
    }

    #[test]
    fn test_booleans() {
        assert!(compare("True", "true", DataType::Boolean));
        assert!(!compare("{true,false}", "{true,true}", DataType::BooleanArray));
    }
}
