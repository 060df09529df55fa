// rusty-valid procedural macros

use proc_macro::TokenStream;

use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod expand;

/// Derive macro for annotation-driven validation
///
/// Generates `rusty_valid::Record` and `rusty_valid::FieldValue` implementations, which
/// makes the struct usable with `Validate::validate` and as a nested record inside
/// other validated structs.
///
/// # Example
///
/// ```ignore
/// use rusty_valid::Validate;
/// use serde::Deserialize;
///
/// #[derive(Validate, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct CreateUserRequest {
///     #[valid("required;min~3;max~50")]
///     user_name: String,
///
///     #[valid("rx~^[^@]+@[^@]+$")]
///     email: String,
///
///     #[valid = "notnull;range~18:120"]
///     age: Option<u32>,
///
///     // Validated recursively, no annotation needed
///     address: Address,
///
///     #[valid(skip)]
///     cache: Cache,
/// }
/// ```
///
/// # Field Attributes
///
/// - `#[valid("rule;rule~arg")]` / `#[valid = "..."]` - Rule annotation; repeated attributes are joined with `;`
/// - `#[valid(rules = "...", rename = "...")]` - Annotation plus the name violations are reported under
/// - `#[valid(skip)]` or `#[valid("-")]` - Field is never looked at
///
/// Without an explicit rename, `#[serde(rename = "...")]` and the container's
/// `#[serde(rename_all = "...")]` decide the reported name.
#[proc_macro_derive(Validate, attributes(valid, serde))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::impl_validate(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
