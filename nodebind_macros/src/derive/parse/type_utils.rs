//! Shallow type inspection.

use syn::{GenericArgument, PathArguments, Type};

/// Returns the inner type if `ty` is `Option<T>`.
///
/// Only the final path segment is inspected, so `std::option::Option<T>`
/// matches as well. The check is not recursive.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(p) = ty else {
        return None;
    };
    let last = p.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use syn::parse_quote;

    #[rstest]
    #[case::plain(parse_quote!(Option<String>), true)]
    #[case::qualified(parse_quote!(::std::option::Option<String>), true)]
    #[case::bare(parse_quote!(String), false)]
    #[case::vec(parse_quote!(Vec<Option<String>>), false)]
    fn detects_optional_types(#[case] ty: Type, #[case] optional: bool) {
        assert_eq!(option_inner(&ty).is_some(), optional);
    }
}
