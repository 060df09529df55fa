// File: src/registry.rs
// Purpose: Name -> evaluator lookup table

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::config::ValidatorConfig;
use crate::rules::{Evaluator, BUILTIN_RULES};
use crate::value::Field;

static BUILTIN: Lazy<RuleRegistry> = Lazy::new(RuleRegistry::default);

/// Immutable mapping from rule name to evaluator
///
/// Built once from the built-in table merged with caller overrides, then shared
/// read-only (usually behind an `Arc`) by every validation call.
#[derive(Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, Evaluator>,
}

impl RuleRegistry {
    /// Built-in rules with `overrides` written on top
    ///
    /// Overrides replace built-ins of the same name and may add new names.
    pub fn build<I, K>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, Evaluator)>,
        K: Into<String>,
    {
        let mut builder = Self::builder();
        for (name, evaluator) in overrides {
            builder = builder.evaluator(name, evaluator);
        }
        builder.build()
    }

    /// Builder seeded with the built-in rules
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Process-wide registry holding only the built-in rules
    pub fn builtin() -> &'static RuleRegistry {
        &BUILTIN
    }

    /// Applies a [`ValidatorConfig`] on top of built-ins and overrides
    ///
    /// The config layer is optional: with [`ValidatorConfig::default`] this is
    /// the same registry as [`RuleRegistry::build`]. Aliases are resolved after
    /// overrides, then disabled names are dropped.
    pub fn from_config<I, K>(config: &ValidatorConfig, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, Evaluator)>,
        K: Into<String>,
    {
        let mut registry = Self::build(overrides);

        for (alias, target) in &config.aliases {
            match registry.rules.get(target).cloned() {
                Some(evaluator) => {
                    registry.rules.insert(alias.clone(), evaluator);
                }
                None => {
                    tracing::warn!(
                        alias = %alias,
                        target = %target,
                        "Alias points at an unknown rule, ignoring"
                    );
                }
            }
        }

        for name in &config.disabled {
            if registry.rules.remove(name).is_none() {
                tracing::debug!(rule = %name, "Disabled rule was not registered");
            }
        }

        registry
    }

    /// Exact-name lookup
    pub fn get(&self, name: &str) -> Option<&Evaluator> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered rule names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

/// Accumulates rules before freezing them into a [`RuleRegistry`]
///
/// Later entries win on name collision.
pub struct RegistryBuilder {
    rules: HashMap<String, Evaluator>,
}

impl RegistryBuilder {
    fn new() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(name, rule)| (name.to_string(), Arc::new(*rule) as Evaluator))
            .collect();
        Self { rules }
    }

    /// Registers a closure or function under `name`
    pub fn rule<F>(self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&Field<'_>, &[&str]) -> bool + Send + Sync + 'static,
    {
        self.evaluator(name, Arc::new(rule))
    }

    /// Registers an already shared evaluator under `name`
    pub fn evaluator(mut self, name: impl Into<String>, evaluator: Evaluator) -> Self {
        self.rules.insert(name.into(), evaluator);
        self
    }

    /// Removes `name`, built-in or not
    pub fn without(mut self, name: &str) -> Self {
        self.rules.remove(name);
        self
    }

    pub fn build(self) -> RuleRegistry {
        RuleRegistry { rules: self.rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::evaluator;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_names() {
        assert_eq!(
            RuleRegistry::builtin().names(),
            vec!["digit", "enum", "max", "min", "notnull", "range", "required", "rx"]
        );
    }

    #[test]
    fn test_override_replaces_builtin() {
        let always: Evaluator = evaluator(|_: &Field<'_>, _: &[&str]| true);
        let registry = RuleRegistry::build([("required", always)]);

        let zero = 0i32;
        let required = registry.get("required").unwrap();
        assert!(required(&Field::resolve(&zero), &[]));
        assert_eq!(registry.len(), BUILTIN_RULES.len());
    }

    #[test]
    fn test_override_adds_new_rule() {
        let registry = RuleRegistry::builder()
            .rule("even", |field: &Field<'_>, _: &[&str]| {
                matches!(field.scalar(), crate::Scalar::Int(v) if v % 2 == 0)
            })
            .build();

        assert!(registry.contains("even"));
        assert!(registry.contains("required"));
        let even = registry.get("even").unwrap();
        assert!(even(&Field::resolve(&4i64), &[]));
        assert!(!even(&Field::resolve(&5i64), &[]));
    }

    #[test]
    fn test_later_override_wins() {
        let registry = RuleRegistry::builder()
            .rule("custom", |_: &Field<'_>, _: &[&str]| false)
            .rule("custom", |_: &Field<'_>, _: &[&str]| true)
            .build();

        let custom = registry.get("custom").unwrap();
        assert!(custom(&Field::resolve(&1u8), &[]));
    }

    #[test]
    fn test_without_removes_rule() {
        let registry = RuleRegistry::builder().without("rx").build();
        assert!(!registry.contains("rx"));
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_config_aliases_and_disabled() {
        let config = ValidatorConfig {
            disabled: vec!["digit".to_string(), "missing".to_string()],
            aliases: [
                ("exp".to_string(), "rx".to_string()),
                ("bogus".to_string(), "nope".to_string()),
            ]
            .into_iter()
            .collect(),
            ..ValidatorConfig::default()
        };
        let registry = RuleRegistry::from_config(&config, Vec::<(String, Evaluator)>::new());

        assert!(registry.contains("exp"));
        assert!(!registry.contains("bogus"));
        assert!(!registry.contains("digit"));

        let value = "abc".to_string();
        let exp = registry.get("exp").unwrap();
        assert!(exp(&Field::resolve(&value), &["^[a-z]+$"]));
    }

    #[test]
    fn test_default_config_matches_plain_build() {
        let overrides = || [("even", evaluator(|_: &Field<'_>, _: &[&str]| true))];
        let configured = RuleRegistry::from_config(&ValidatorConfig::default(), overrides());
        let plain = RuleRegistry::build(overrides());

        assert_eq!(configured.names(), plain.names());
        assert!(configured.contains("even"));
    }
}
