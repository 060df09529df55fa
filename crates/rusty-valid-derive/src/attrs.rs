// File: rusty-valid-derive/src/attrs.rs
// Purpose: `#[valid]` and `#[serde]` attribute processing

use syn::ext::IdentExt;
use syn::{Attribute, Expr, ExprLit, Field, Lit, LitStr, Meta};

/// Annotation marking a field the engine never looks at
pub const SKIP: &str = "-";

/// Everything the derive needs to know about one field
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Rule annotations in attribute order
    pub rules: Vec<String>,
    /// `#[valid(rename = "...")]`
    pub rename: Option<String>,
    /// `#[serde(rename = "...")]`
    pub serde_rename: Option<String>,
    pub skip: bool,
}

impl FieldAttrs {
    /// Rules joined into a single annotation string
    pub fn annotation(&self) -> String {
        if self.skip {
            return SKIP.to_string();
        }
        self.rules.join(";")
    }

    /// Name violations are reported under: explicit rename, then serde rename,
    /// then the container's `rename_all` applied to the declared name
    pub fn external_name(&self, declared: &str, rename_all: Option<RenameRule>) -> Option<String> {
        self.rename
            .clone()
            .or_else(|| self.serde_rename.clone())
            .or_else(|| rename_all.map(|rule| rule.apply(declared)))
            .filter(|name| name != declared)
    }
}

/// Parse `#[valid]` and `#[serde]` attributes from a field
pub fn extract_field_attrs(field: &Field) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();

    for attr in &field.attrs {
        if attr.path().is_ident("valid") {
            parse_valid_attr(attr, &mut parsed)?;
        } else if attr.path().is_ident("serde") {
            if let Some(name) = serde_name(attr, "rename") {
                parsed.serde_rename = Some(name);
            }
        }
    }

    if parsed.rules.iter().any(|rule| rule == SKIP) {
        parsed.skip = true;
    }

    Ok(parsed)
}

/// Container-level `#[serde(rename_all = "...")]`
pub fn extract_rename_all(attrs: &[Attribute]) -> syn::Result<Option<RenameRule>> {
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        if let Some(rule) = serde_name(attr, "rename_all") {
            return RenameRule::from_name(&rule).map(Some).ok_or_else(|| {
                syn::Error::new_spanned(attr, format!("unknown rename_all rule: {:?}", rule))
            });
        }
    }
    Ok(None)
}

/// Handles `#[valid("..")]`, `#[valid = ".."]` and `#[valid(rules = "..", rename = "..", skip)]`
fn parse_valid_attr(attr: &Attribute, parsed: &mut FieldAttrs) -> syn::Result<()> {
    match &attr.meta {
        Meta::NameValue(meta) => match &meta.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => {
                parsed.rules.push(s.value());
                Ok(())
            }
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        },
        Meta::List(list) => {
            if let Ok(s) = list.parse_args::<LitStr>() {
                parsed.rules.push(s.value());
                return Ok(());
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rules") {
                    let s: LitStr = meta.value()?.parse()?;
                    parsed.rules.push(s.value());
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let s: LitStr = meta.value()?.parse()?;
                    parsed.rename = Some(s.value());
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else {
                    Err(meta.error(
                        "unsupported valid attribute, expected `rules`, `rename` or `skip`",
                    ))
                }
            })
        }
        Meta::Path(path) => Err(syn::Error::new_spanned(
            path,
            "expected #[valid(\"rules\")] or #[valid = \"rules\"]",
        )),
    }
}

/// Reads `key = ".."` or `key(serialize = "..")` out of a serde attribute
///
/// Keys this crate does not care about are consumed and ignored; serde reports
/// its own errors.
fn serde_name(attr: &Attribute, key: &str) -> Option<String> {
    let mut found = None;

    let _ = attr.parse_nested_meta(|meta| {
        if meta.path.is_ident(key) {
            if meta.input.peek(syn::Token![=]) {
                let s: LitStr = meta.value()?.parse()?;
                found = Some(s.value());
            } else {
                meta.parse_nested_meta(|inner| {
                    let s: LitStr = inner.value()?.parse()?;
                    if inner.path.is_ident("serialize") {
                        found = Some(s.value());
                    }
                    Ok(())
                })?;
            }
        } else if meta.input.peek(syn::Token![=]) {
            let _: Expr = meta.value()?.parse()?;
        } else if meta.input.peek(syn::token::Paren) {
            let content;
            syn::parenthesized!(content in meta.input);
            let _: proc_macro2::TokenStream = content.parse()?;
        }
        Ok(())
    });

    found
}

/// Declared field name without a raw-identifier prefix
pub fn declared_name(field: &Field) -> Option<String> {
    field.ident.as_ref().map(|ident| ident.unraw().to_string())
}

/// Case conversions accepted by `rename_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    LowerCase,
    UpperCase,
    PascalCase,
    CamelCase,
    SnakeCase,
    ScreamingSnakeCase,
    KebabCase,
    ScreamingKebabCase,
}

impl RenameRule {
    pub fn from_name(rule: &str) -> Option<Self> {
        let rule = match rule {
            "lowercase" => RenameRule::LowerCase,
            "UPPERCASE" => RenameRule::UpperCase,
            "PascalCase" => RenameRule::PascalCase,
            "camelCase" => RenameRule::CamelCase,
            "snake_case" => RenameRule::SnakeCase,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnakeCase,
            "kebab-case" => RenameRule::KebabCase,
            "SCREAMING-KEBAB-CASE" => RenameRule::ScreamingKebabCase,
            _ => return None,
        };
        Some(rule)
    }

    /// Converts a snake_case field name
    pub fn apply(self, field: &str) -> String {
        match self {
            RenameRule::LowerCase | RenameRule::SnakeCase => field.to_string(),
            RenameRule::UpperCase | RenameRule::ScreamingSnakeCase => field.to_ascii_uppercase(),
            RenameRule::PascalCase => {
                let mut pascal = String::with_capacity(field.len());
                let mut capitalize = true;
                for ch in field.chars() {
                    if ch == '_' {
                        capitalize = true;
                    } else if capitalize {
                        pascal.push(ch.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        pascal.push(ch);
                    }
                }
                pascal
            }
            RenameRule::CamelCase => {
                let pascal = RenameRule::PascalCase.apply(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            }
            RenameRule::KebabCase => field.replace('_', "-"),
            RenameRule::ScreamingKebabCase => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}
