// File: rusty-valid-derive/src/expand.rs
// Purpose: Record / FieldValue generation for #[derive(Validate)]

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Data, DeriveInput, Fields};

use crate::attrs::{declared_name, extract_field_attrs, extract_rename_all};

pub fn impl_validate(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let type_name = name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Validate only supports structs with named fields",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Validate only supports structs")),
    };

    let rename_all = extract_rename_all(&input.attrs)?;

    let mut descriptors = Vec::new();
    let mut zero_checks = Vec::new();

    for field in fields {
        let attrs = extract_field_attrs(field)?;
        // Skipped fields are invisible to the engine and need not implement FieldValue
        if attrs.skip {
            continue;
        }

        let Some(ident) = &field.ident else {
            continue;
        };
        let declared = declared_name(field).unwrap_or_else(|| ident.to_string());
        let annotation = attrs.annotation();

        let rename = match attrs.external_name(&declared, rename_all) {
            Some(external) => quote! { .rename(#external) },
            None => quote! {},
        };

        descriptors.push(quote! {
            ::rusty_valid::FieldDescriptor::new(#declared, &self.#ident)
                .annotation(#annotation)
                #rename
        });
        zero_checks.push(quote! {
            ::rusty_valid::FieldValue::is_zero(&self.#ident)
        });
    }

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::rusty_valid::FieldValue));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::rusty_valid::Record for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> ::std::vec::Vec<::rusty_valid::FieldDescriptor<'_>> {
                ::std::vec![#(#descriptors),*]
            }
        }

        impl #impl_generics ::rusty_valid::FieldValue for #name #ty_generics #where_clause {
            fn kind(&self) -> &'static str {
                "struct"
            }

            fn is_zero(&self) -> bool {
                true #(&& #zero_checks)*
            }

            fn as_record(&self) -> ::std::option::Option<&dyn ::rusty_valid::Record> {
                ::std::option::Option::Some(self as &dyn ::rusty_valid::Record)
            }

            fn field_kind() -> ::rusty_valid::FieldKind
            where
                Self: Sized,
            {
                ::rusty_valid::FieldKind::NestedRecord
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: DeriveInput) -> String {
        impl_validate(&input).unwrap().to_string()
    }

    #[test]
    fn test_generates_both_impls() {
        let output = expand(parse_quote! {
            struct Signup {
                #[valid("required;min~3")]
                login: String,
                #[serde(rename = "userAge")]
                #[valid("range~18:120")]
                age: u32,
            }
        });

        assert!(output.contains(":: rusty_valid :: Record for Signup"));
        assert!(output.contains(":: rusty_valid :: FieldValue for Signup"));
        assert!(output.contains("\"required;min~3\""));
        assert!(output.contains(". rename (\"userAge\")"));
    }

    #[test]
    fn test_skipped_field_is_left_out() {
        let output = expand(parse_quote! {
            struct Cached {
                #[valid("required")]
                key: String,
                #[valid("-")]
                handle: std::fs::File,
            }
        });

        assert!(output.contains("\"key\""));
        assert!(!output.contains("handle"));
    }

    #[test]
    fn test_generic_params_gain_bound() {
        let output = expand(parse_quote! {
            struct Page<T> {
                #[valid("required")]
                items: Vec<T>,
            }
        });
        assert!(output.contains("T : :: rusty_valid :: FieldValue"));
    }

    #[test]
    fn test_rejects_tuple_structs_and_enums() {
        let tuple: DeriveInput = parse_quote! { struct Pair(u8, u8); };
        assert!(impl_validate(&tuple).is_err());

        let choice: DeriveInput = parse_quote! { enum Choice { A, B } };
        assert!(impl_validate(&choice).is_err());
    }
}
