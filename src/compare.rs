//! String comparators.

use std::cmp::Ordering;

/// True iff `a` sorts strictly before `b` byte by byte.
///
/// Ordinal and case-sensitive: no locale, no folding, no numeric reading.
/// On a shared prefix the shorter string comes first.
pub fn string_lt(a: &str, b: &str) -> bool {
    a.as_bytes().cmp(b.as_bytes()) == Ordering::Less
}
