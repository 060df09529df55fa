//! Declarative struct validation
//!
//! Fields carry a compact rule annotation (`required;range~1:50`), the engine walks
//! a record (recursing into nested records) and returns every violation at once.
//!
//! ```ignore
//! use rusty_valid::Validate;
//!
//! #[derive(Validate)]
//! struct Signup {
//!     #[valid("required;min~3;max~32")]
//!     login: String,
//!
//!     #[valid("range~18:120")]
//!     age: u32,
//!
//!     #[valid("enum~free,pro")]
//!     plan: Option<String>,
//! }
//!
//! let form = Signup { login: "al".into(), age: 17, plan: None };
//! let errors = form.validate().unwrap_err();
//! assert!(errors.has_field("login"));
//! assert!(errors.has_field("age"));
//! ```

// Lets the derive output (`::rusty_valid::...`) resolve inside this crate's own tests
extern crate self as rusty_valid;

pub mod config;
pub mod engine;
pub mod error;
pub mod record;
pub mod registry;
pub mod rules;
pub mod tag;
pub mod value;

pub use config::ValidatorConfig;
pub use engine::{collect_violations, validate, Validator};
pub use error::{ErrorKind, ValidationErrors, Violation};
pub use record::{FieldDescriptor, FieldKind, Record};
pub use registry::{RegistryBuilder, RuleRegistry};
pub use rules::{evaluator, Evaluator};
pub use tag::{parse, Rule};
pub use value::{Field, FieldValue, Scalar};

/// Derive `Record` and `FieldValue` for a struct with named fields
pub use rusty_valid_derive::Validate;

/// Entry point for validating a value
///
/// Implemented for every [`FieldValue`]; only records (or an `Option` holding one)
/// validate cleanly, anything else reports a shape error on the `type` field.
pub trait Validate {
    /// Validate against the built-in rules
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Validate against a caller-supplied registry
    fn validate_with(&self, registry: &RuleRegistry) -> Result<(), ValidationErrors>;
}

impl<T: FieldValue + ?Sized> Validate for T {
    fn validate(&self) -> Result<(), ValidationErrors> {
        engine::validate(&self, RuleRegistry::builtin())
    }

    fn validate_with(&self, registry: &RuleRegistry) -> Result<(), ValidationErrors> {
        engine::validate(&self, registry)
    }
}
