//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr, Token};

/// Parses a string literal assigned to `key`.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    let literal = meta.value()?.parse::<Lit>()?;
    match literal {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}

/// Parses a flag written either bare or as `key = true|false`.
///
/// ```rust,ignore
/// // `#[bind(required)]` and `#[bind(required = true)]` are equivalent.
/// let enabled = flag(&meta)?;
/// ```
pub(crate) fn flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        Ok(meta.value()?.parse::<syn::LitBool>()?.value)
    } else {
        Ok(true)
    }
}
