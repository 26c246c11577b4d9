//! Expansion entry points shared by both derives.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::DeriveInput;

mod generate;
mod parse;

/// Prefix for every runtime item named by generated code.
///
/// `nodebind` unless the input carries a `crate = "..."` override, which is
/// how the runtime's own types and renamed dependencies reach it.
fn runtime_path(path: Option<&syn::Path>) -> TokenStream {
    path.map_or_else(|| quote! { nodebind }, ToTokens::to_token_stream)
}

/// Expands `#[derive(Target)]`.
pub(crate) fn target(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_target_input(input)?;
    let krate = runtime_path(parsed.attrs.crate_path.as_ref());
    let target_impl = generate::target_impl(&parsed, &krate);
    let field_impl = generate::field_impl(&parsed, &krate);
    Ok(quote! {
        #target_impl
        #field_impl
    })
}

/// Expands `#[derive(ScalarEnum)]`.
pub(crate) fn scalar_enum(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_scalar_enum_input(input)?;
    let krate = runtime_path(parsed.crate_path.as_ref());
    Ok(generate::scalar_enum_impl(&parsed, &krate))
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use syn::parse_quote;

    use super::*;

    #[rstest]
    #[case::local(parse_quote!(crate), "crate")]
    #[case::renamed(parse_quote!(engine::nodebind), "engine :: nodebind")]
    fn overrides_replace_the_runtime_path(
        #[case] path: syn::Path,
        #[case] expected: &str,
    ) -> Result<()> {
        let rendered = runtime_path(Some(&path)).to_string();
        ensure!(rendered == expected, "rendered {rendered}");
        Ok(())
    }

    #[test]
    fn runtime_path_defaults_to_nodebind() -> Result<()> {
        ensure!(runtime_path(None).to_string() == "nodebind");
        Ok(())
    }

    #[test]
    fn aliased_targets_expand_through_the_override() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            #[bind(crate = "engine::nodebind")]
            struct Ring {
                radius: f64,
            }
        };
        let expanded: String = target(&input)?
            .to_string()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        ensure!(expanded.contains("implengine::nodebind::TargetforRing"));
        ensure!(expanded.contains("implengine::nodebind::FieldforRing"));
        Ok(())
    }
}
