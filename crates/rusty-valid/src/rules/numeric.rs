//! Numeric rules: `range`, `min` and `max`

use std::cmp::Ordering;
use std::str::FromStr;

use crate::value::{Field, Scalar};

/// `range~min:max`: inclusive bounds on a numeric value
///
/// Absent or plain zero values pass. Bounds are parsed in the value's own numeric
/// family, so `range~-1:50` cannot apply to an unsigned field. Text and other
/// non-numeric shapes fail.
pub fn is_in_range(field: &Field<'_>, args: &[&str]) -> bool {
    let Some(bounds) = args.first() else {
        return true;
    };
    if field.is_vacant() {
        return true;
    }

    let Some((low, high)) = bounds.split_once(':') else {
        return false;
    };

    match field.scalar() {
        Scalar::Float(value) => within(value, low, high),
        Scalar::Int(value) => within(value, low, high),
        Scalar::Uint(value) => within(value, low, high),
        _ => false,
    }
}

fn within<T: FromStr + PartialOrd>(value: T, low: &str, high: &str) -> bool {
    match (low.parse::<T>(), high.parse::<T>()) {
        (Ok(min), Ok(max)) => min <= value && value <= max,
        _ => false,
    }
}

/// `min~n`: text needs at least `n` characters, numbers must be `>= n`
pub fn is_min(field: &Field<'_>, args: &[&str]) -> bool {
    check_threshold(field, args, |ordering| ordering != Ordering::Less)
}

/// `max~n`: text needs at most `n` characters, numbers must be `<= n`
pub fn is_max(field: &Field<'_>, args: &[&str]) -> bool {
    check_threshold(field, args, |ordering| ordering != Ordering::Greater)
}

/// Compares the value (or text length) against an integer threshold
///
/// Absent optionals fail, an unparsable threshold fails, unsupported shapes pass.
fn check_threshold(field: &Field<'_>, args: &[&str], accept: impl Fn(Ordering) -> bool) -> bool {
    let Some(arg) = args.first() else {
        return true;
    };
    if field.is_absent() {
        return false;
    }
    let Ok(threshold) = arg.parse::<i64>() else {
        return false;
    };

    let ordering = match field.scalar() {
        Scalar::Str(text) => (text.chars().count() as i128).cmp(&i128::from(threshold)),
        Scalar::Int(value) => value.cmp(&threshold),
        Scalar::Uint(value) => i128::from(value).cmp(&i128::from(threshold)),
        Scalar::Float(value) => match value.partial_cmp(&(threshold as f64)) {
            Some(ordering) => ordering,
            None => return false,
        },
        Scalar::Bool(_) | Scalar::Unsupported => return true,
    };

    accept(ordering)
}
