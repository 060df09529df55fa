// File: src/engine.rs
// Purpose: Recursive validation of records against their field annotations

use std::sync::Arc;

use crate::config::ValidatorConfig;
use crate::error::ValidationErrors;
use crate::record::{FieldDescriptor, Record};
use crate::registry::RuleRegistry;
use crate::rules::Evaluator;
use crate::tag;
use crate::value::{Field, FieldValue};

/// Synthetic field name used when the validated value is not a record
pub const TYPE_FIELD: &str = "type";

/// Validates records against a shared, read-only [`RuleRegistry`]
///
/// Cheap to clone; clones share the registry.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<RuleRegistry>,
    log_violations: bool,
}

impl Validator {
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self {
            registry,
            log_violations: true,
        }
    }

    /// Builds the registry from `config` plus `overrides`
    pub fn from_config<I, K>(config: &ValidatorConfig, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, Evaluator)>,
        K: Into<String>,
    {
        Self {
            registry: Arc::new(RuleRegistry::from_config(config, overrides)),
            log_violations: config.log_violations,
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validates `value`; `Ok(())` means no violations
    pub fn validate(&self, value: &dyn FieldValue) -> Result<(), ValidationErrors> {
        let errors = self.collect(value);
        if self.log_violations && !errors.is_empty() {
            tracing::debug!(violations = errors.len(), "Validation failed");
        }
        errors.into_result()
    }

    /// Runs validation and returns the raw (possibly empty) collection
    pub fn collect(&self, value: &dyn FieldValue) -> ValidationErrors {
        collect_violations(&self.registry, value)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Arc::new(RuleRegistry::default()))
    }
}

/// Validates `value` against `registry`
pub fn validate(value: &dyn FieldValue, registry: &RuleRegistry) -> Result<(), ValidationErrors> {
    collect_violations(registry, value).into_result()
}

/// Shape check plus record walk; never fails, only collects
pub fn collect_violations(registry: &RuleRegistry, value: &dyn FieldValue) -> ValidationErrors {
    let target = match value.optional() {
        Some(Some(inner)) => inner,
        Some(None) => return shape_error("none"),
        None => value,
    };

    match target.as_record() {
        Some(record) => validate_record(registry, record),
        None => shape_error(target.kind()),
    }
}

fn shape_error(kind: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.push(
        TYPE_FIELD,
        format!("Type struct required. Type {} received", kind),
    );
    errors
}

fn validate_record(registry: &RuleRegistry, record: &dyn Record) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for field in record.fields() {
        if tag::is_skip(field.annotation) {
            continue;
        }

        // Nested records are checked whatever the field's own rules say
        for nested in nested_records(&field) {
            errors.merge(validate_record(registry, nested));
        }

        apply_rules(registry, record.type_name(), &field, &mut errors);
    }

    errors
}

fn apply_rules(
    registry: &RuleRegistry,
    type_name: &str,
    field: &FieldDescriptor<'_>,
    errors: &mut ValidationErrors,
) {
    let name = field.external_name();
    let resolved = Field::resolve(field.value);

    for rule in tag::parse(field.annotation) {
        let Some(evaluator) = registry.get(rule.name) else {
            tracing::debug!(
                record = type_name,
                field = name,
                rule = rule.name,
                "No evaluator registered, skipping rule"
            );
            continue;
        };

        let valid = evaluator(&resolved, rule.args.as_slice());
        tracing::trace!(
            record = type_name,
            field = name,
            rule = rule.name,
            valid,
            "Rule evaluated"
        );
        if !valid {
            errors.push(name, format!("Invalid validation for {} rule", rule.name));
        }
    }
}

/// Records reachable from a field: direct, through one `Option`, or as elements
/// of a (possibly optional) sequence
///
/// Decided from the value itself, so borrowed records (`&Inner`, `Option<&Inner>`)
/// are found as well. Optional records are recursed into unconditionally.
fn nested_records<'a>(field: &FieldDescriptor<'a>) -> Vec<&'a dyn Record> {
    let value = match field.value.optional() {
        Some(Some(inner)) => inner,
        Some(None) => return Vec::new(),
        None => field.value,
    };

    if let Some(record) = value.as_record() {
        return vec![record];
    }

    value
        .elements()
        .map(|items| items.into_iter().filter_map(|item| item.as_record()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldKind;
    use pretty_assertions::assert_eq;

    // Hand-written record, the way the derive macro would describe it
    struct Account {
        login: String,
        age: Option<u32>,
        note: String,
    }

    impl Record for Account {
        fn type_name(&self) -> &'static str {
            "Account"
        }

        fn fields(&self) -> Vec<FieldDescriptor<'_>> {
            vec![
                FieldDescriptor::new("login", &self.login).annotation("required;min~3"),
                FieldDescriptor::new("age", &self.age)
                    .rename("userAge")
                    .annotation("notnull;range~18:120"),
                FieldDescriptor::new("note", &self.note).annotation("-"),
            ]
        }
    }

    impl FieldValue for Account {
        fn kind(&self) -> &'static str {
            "struct"
        }

        fn is_zero(&self) -> bool {
            self.login.is_zero() && self.age.is_zero() && self.note.is_zero()
        }

        fn as_record(&self) -> Option<&dyn Record> {
            Some(self as &dyn Record)
        }

        fn field_kind() -> FieldKind {
            FieldKind::NestedRecord
        }
    }

    fn fields_of(errors: &ValidationErrors) -> Vec<(&str, &str)> {
        errors
            .iter()
            .map(|v| (v.field.as_str(), v.message.as_str()))
            .collect()
    }

    #[test]
    fn test_valid_record() {
        let account = Account {
            login: "admin".to_string(),
            age: Some(30),
            note: String::new(),
        };
        assert_eq!(Validator::default().validate(&account), Ok(()));
    }

    #[test]
    fn test_violations_use_external_names() {
        let account = Account {
            login: "ab".to_string(),
            age: None,
            note: String::new(),
        };
        let errors = Validator::default().validate(&account).unwrap_err();
        assert_eq!(
            fields_of(&errors),
            vec![
                ("login", "Invalid validation for min rule"),
                ("userAge", "Invalid validation for notnull rule"),
            ]
        );
    }

    #[test]
    fn test_multiple_failures_on_one_field() {
        let account = Account {
            login: String::new(),
            age: Some(30),
            note: String::new(),
        };
        let errors = Validator::default().collect(&account);
        assert_eq!(
            fields_of(&errors),
            vec![
                ("login", "Invalid validation for required rule"),
                ("login", "Invalid validation for min rule"),
            ]
        );
    }

    #[test]
    fn test_non_record_is_shape_error() {
        let errors = validate(&42i32, RuleRegistry::builtin()).unwrap_err();
        assert_eq!(
            fields_of(&errors),
            vec![("type", "Type struct required. Type int received")]
        );
    }

    #[test]
    fn test_optional_record_is_unwrapped_once() {
        let present = Some(Account {
            login: "admin".to_string(),
            age: Some(30),
            note: String::new(),
        });
        assert_eq!(validate(&present, RuleRegistry::builtin()), Ok(()));

        let absent: Option<Account> = None;
        let errors = validate(&absent, RuleRegistry::builtin()).unwrap_err();
        assert_eq!(
            fields_of(&errors),
            vec![("type", "Type struct required. Type none received")]
        );
    }

    #[test]
    fn test_unknown_rules_are_skipped() {
        struct Loose {
            code: String,
        }

        impl Record for Loose {
            fn type_name(&self) -> &'static str {
                "Loose"
            }

            fn fields(&self) -> Vec<FieldDescriptor<'_>> {
                vec![FieldDescriptor::new("code", &self.code).annotation("exp~[0-5]+;future;required")]
            }
        }

        impl FieldValue for Loose {
            fn kind(&self) -> &'static str {
                "struct"
            }

            fn is_zero(&self) -> bool {
                self.code.is_zero()
            }

            fn as_record(&self) -> Option<&dyn Record> {
                Some(self as &dyn Record)
            }
        }

        let errors = Validator::default()
            .validate(&Loose { code: String::new() })
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("code"));
    }
}
