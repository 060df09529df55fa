//! The `enum` rule: value must be one of a comma-separated list

use crate::value::{Field, Scalar};

/// Absolute tolerance for float membership
pub const FLOAT_TOLERANCE: f64 = 1e-7;

/// `enum~a,b,c`
///
/// Text compares exactly, integers compare exactly and floats within
/// [`FLOAT_TOLERANCE`]. Absent and plain zero values pass (`required` is the
/// presence rule), and so do shapes the list cannot describe.
pub fn is_enum_member(field: &Field<'_>, args: &[&str]) -> bool {
    let Some(list) = args.first() else {
        return true;
    };
    if field.is_vacant() {
        return true;
    }

    let mut candidates = list.split(',');
    match field.scalar() {
        Scalar::Str(value) => candidates.any(|candidate| candidate == value),
        Scalar::Float(value) => first_match(candidates, |candidate| {
            candidate
                .parse::<f64>()
                .map(|candidate| floats_match(value, candidate))
        }),
        Scalar::Int(value) => first_match(candidates, |candidate| {
            candidate.parse::<i64>().map(|candidate| candidate == value)
        }),
        Scalar::Uint(value) => first_match(candidates, |candidate| {
            candidate.parse::<u64>().map(|candidate| candidate == value)
        }),
        Scalar::Bool(_) | Scalar::Unsupported => true,
    }
}

/// Walks the list in order; a candidate that does not parse before any match fails the rule
fn first_match<'a, E>(
    candidates: impl Iterator<Item = &'a str>,
    matches: impl Fn(&str) -> Result<bool, E>,
) -> bool {
    for candidate in candidates {
        match matches(candidate) {
            Ok(true) => return true,
            Ok(false) => {}
            Err(_) => return false,
        }
    }
    false
}

// The epsilon slack absorbs the representation error of decimal literals,
// e.g. 10.0000001 sits a hair above 1e-7 away from 10 in binary.
fn floats_match(value: f64, candidate: f64) -> bool {
    (value - candidate).abs() <= FLOAT_TOLERANCE + f64::EPSILON * value.abs().max(candidate.abs())
}
