// File: src/rules/mod.rs
// Purpose: Built-in rule evaluators and the evaluator callback type

use std::sync::Arc;

use crate::value::Field;

pub mod enumeration;
pub mod numeric;
pub mod presence;
pub mod string;

pub use enumeration::is_enum_member;
pub use numeric::{is_in_range, is_max, is_min};
pub use presence::{is_not_null, is_required};
pub use string::{is_digits, matches_patterns};

/// A rule evaluator: `true` means the resolved field satisfies the rule
///
/// Receives the field with one level of optionality already resolved, plus the raw
/// rule arguments (zero or one string, split further by the evaluator if needed).
pub type Evaluator = Arc<dyn Fn(&Field<'_>, &[&str]) -> bool + Send + Sync>;

/// Plain function form of an evaluator, used by the built-in table
pub type RuleFn = fn(&Field<'_>, &[&str]) -> bool;

/// Rules every registry starts from
pub const BUILTIN_RULES: &[(&str, RuleFn)] = &[
    ("required", is_required),
    ("notnull", is_not_null),
    ("enum", is_enum_member),
    ("range", is_in_range),
    ("rx", matches_patterns),
    ("min", is_min),
    ("max", is_max),
    ("digit", is_digits),
];

/// Wraps a closure or function as a shareable [`Evaluator`]
pub fn evaluator<F>(f: F) -> Evaluator
where
    F: Fn(&Field<'_>, &[&str]) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}
