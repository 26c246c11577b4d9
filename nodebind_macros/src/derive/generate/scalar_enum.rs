//! Token generation for `#[derive(ScalarEnum)]`.

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::ext::IdentExt;

use crate::derive::parse::ScalarEnumInput;

/// Generates `ParseScalar` and `Field` for a fieldless enum.
pub(crate) fn scalar_enum_impl(input: &ScalarEnumInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let type_name = ident.unraw().to_string();
    let names: Vec<&str> = input.variants.iter().map(|v| v.name.as_str()).collect();
    let variants: Vec<_> = input.variants.iter().map(|v| &v.ident).collect();
    let expected = format!("expected one of: {}", names.join(", "));
    let positional = input.positional.then(|| {
        let indices = (0..variants.len()).map(Literal::usize_unsuffixed);
        quote! {
            match trimmed.parse::<usize>() {
                #( ::core::result::Result::Ok(#indices) => {
                    return ::core::result::Result::Ok(Self::#variants);
                } )*
                _ => {}
            }
        }
    });

    quote! {
        #[automatically_derived]
        impl #krate::ParseScalar for #ident {
            const TYPE_NAME: &'static str = #type_name;

            fn parse_scalar(raw: &str) -> ::core::result::Result<Self, #krate::ScalarFormatError> {
                let trimmed = raw.trim();
                #( if trimmed.eq_ignore_ascii_case(#names) {
                    return ::core::result::Result::Ok(Self::#variants);
                } )*
                #positional
                ::core::result::Result::Err(#krate::ScalarFormatError::new(
                    raw,
                    <Self as #krate::ParseScalar>::TYPE_NAME,
                    #expected,
                ))
            }
        }

        #krate::scalar_field!(#ident);
    }
}
