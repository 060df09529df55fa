//! Presence rules: `required` and `notnull`

use crate::value::Field;

/// `required`: the value must be present and not the type's zero value
///
/// Optional slots are dereferenced first, so `Some(0)` fails just like `0`.
pub fn is_required(field: &Field<'_>, _args: &[&str]) -> bool {
    !field.is_zero()
}

/// `notnull`: an optional slot must hold something; zero values are fine
pub fn is_not_null(field: &Field<'_>, _args: &[&str]) -> bool {
    !field.is_absent()
}
