//! Comparisons whose running time does not depend on where inputs differ.

use subtle::ConstantTimeEq;

/// Compares two strings in constant time with respect to their contents.
///
/// Length is not hidden: inputs of different length compare unequal.
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
