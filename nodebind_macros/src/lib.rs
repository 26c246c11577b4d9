//! Procedural macros for `nodebind`.
//!
//! [`Target`] turns a struct with named fields into a bindable target: it
//! emits the member descriptor table, the per-phase resolution routine and a
//! `Field` implementation so the struct can itself appear as a member of
//! another target. [`ScalarEnum`] lets a fieldless enum be written as a
//! scalar literal.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `nodebind::Target`.
///
/// Struct attributes, written `#[bind(...)]`:
///
/// - `hooks` forwards lifecycle notifications to the struct's
///   `LifecycleHooks` implementation.
/// - `scalar` also accepts a scalar entry, parsed through the struct's
///   `ParseScalar` implementation.
/// - `rename_all = "camelCase"` derives keys from field names using one of
///   `camelCase`, `PascalCase`, `snake_case`, `kebab-case` or `lowercase`.
/// - `crate = "path"` names the runtime crate when it is aliased.
///
/// Field attributes:
///
/// - `key = "name"` overrides the configuration key.
/// - `required`, `merge` and `early` set the matching descriptor flags.
/// - `kind = "scalar"` or `kind = "node"` restricts the accepted shape.
/// - `join = ","` concatenates repeated scalar entries before parsing.
/// - `identity` marks the string field naming the instance.
/// - `flatten` splices a nested target's members in ahead of this struct's.
/// - `collection(significance = "key", prefix = "...", element = "...")`
///   binds a container member element by element.
/// - `skip` leaves the field out of binding.
///
/// The struct must implement `Default`.
#[proc_macro_derive(Target, attributes(bind))]
pub fn derive_target(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::target(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro for `nodebind::ParseScalar` on fieldless enums.
///
/// Variant names match case-insensitively; `#[scalar(rename = "...")]`
/// replaces the accepted spelling. When no variant declares an explicit
/// discriminant, a variant's zero-based position is accepted as well.
#[proc_macro_derive(ScalarEnum, attributes(scalar))]
pub fn derive_scalar_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::scalar_enum(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
