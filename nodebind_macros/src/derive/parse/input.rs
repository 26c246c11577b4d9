//! Input gathering for both derives.
//!
//! Each entry point validates the whole item in one pass so expansion fails
//! fast, pointing at the offending field or variant.

use std::collections::HashSet;

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, Type};

use super::{
    FieldAttrs, StructAttrs, parse_enum_crate, parse_field_attrs, parse_struct_attrs,
    parse_variant_rename,
};

/// How a field takes part in binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MemberRole {
    /// Resolved through `Binder::resolve_member`.
    Value,
    /// Resolved through `Binder::resolve_collection`.
    Collection,
    /// Nested target whose members are spliced in.
    Flatten,
    /// Left alone.
    Skipped,
}

/// One struct field with its resolved key.
pub(crate) struct Member {
    pub ident: Ident,
    pub ty: Type,
    pub key: String,
    pub role: MemberRole,
    pub attrs: FieldAttrs,
}

/// A struct accepted by `#[derive(Target)]`.
pub(crate) struct TargetInput {
    pub ident: Ident,
    pub attrs: StructAttrs,
    pub members: Vec<Member>,
}

impl TargetInput {
    /// Members spliced in from flattened targets.
    pub(crate) fn flattened(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.role == MemberRole::Flatten)
    }

    /// Members this struct binds itself, in declaration order.
    pub(crate) fn bound(&self) -> impl Iterator<Item = &Member> {
        self.members
            .iter()
            .filter(|m| matches!(m.role, MemberRole::Value | MemberRole::Collection))
    }

    /// The field marked `identity`, if any.
    pub(crate) fn identity(&self) -> Option<&Member> {
        self.members.iter().find(|m| m.attrs.identity)
    }
}

fn reject_generics(input: &DeriveInput, derive: &str) -> syn::Result<()> {
    if input.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &input.generics,
            format!("{derive} cannot be derived for generic types"),
        ))
    }
}

fn role_of(attrs: &FieldAttrs) -> MemberRole {
    if attrs.skip {
        MemberRole::Skipped
    } else if attrs.flatten {
        MemberRole::Flatten
    } else if attrs.collection.is_some() {
        MemberRole::Collection
    } else {
        MemberRole::Value
    }
}

fn member(field: &syn::Field, struct_attrs: &StructAttrs) -> syn::Result<Member> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Target requires named fields"))?;
    let attrs = parse_field_attrs(field)?;
    let key = match (&attrs.key, struct_attrs.rename_all) {
        (Some(explicit), _) => explicit.value(),
        (None, Some(rule)) => rule.apply(&ident.unraw().to_string()),
        (None, None) => ident.unraw().to_string(),
    };
    Ok(Member {
        ident,
        ty: field.ty.clone(),
        key,
        role: role_of(&attrs),
        attrs,
    })
}

/// Gathers and validates a struct deriving `Target`.
pub(crate) fn parse_target_input(input: &DeriveInput) -> syn::Result<TargetInput> {
    reject_generics(input, "Target")?;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Target can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            data.struct_token,
            "Target requires named fields",
        ));
    };
    let attrs = parse_struct_attrs(&input.attrs)?;
    let members = named
        .named
        .iter()
        .map(|field| member(field, &attrs))
        .collect::<syn::Result<Vec<_>>>()?;

    let parsed = TargetInput {
        ident: input.ident.clone(),
        attrs,
        members,
    };
    check_keys(&parsed)?;
    check_identity(&parsed)?;
    Ok(parsed)
}

fn check_keys(input: &TargetInput) -> syn::Result<()> {
    let mut seen = HashSet::new();
    for m in input.bound() {
        if m.key != "self" && !seen.insert(m.key.as_str()) {
            return Err(syn::Error::new_spanned(
                &m.ident,
                format!("key '{}' is bound by more than one field", m.key),
            ));
        }
    }
    Ok(())
}

fn check_identity(input: &TargetInput) -> syn::Result<()> {
    let mut marked = input.members.iter().filter(|m| m.attrs.identity);
    match (marked.next(), marked.next()) {
        (Some(_), Some(second)) => Err(syn::Error::new_spanned(
            &second.ident,
            "only one field can be marked identity",
        )),
        _ => Ok(()),
    }
}

/// A fieldless variant and the literal that selects it.
pub(crate) struct EnumVariant {
    pub ident: Ident,
    pub name: String,
}

/// An enum accepted by `#[derive(ScalarEnum)]`.
pub(crate) struct ScalarEnumInput {
    pub ident: Ident,
    pub crate_path: Option<syn::Path>,
    pub variants: Vec<EnumVariant>,
    /// Whether positions are accepted as numeric literals.
    pub positional: bool,
}

/// Gathers and validates an enum deriving `ScalarEnum`.
pub(crate) fn parse_scalar_enum_input(input: &DeriveInput) -> syn::Result<ScalarEnumInput> {
    reject_generics(input, "ScalarEnum")?;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ScalarEnum can only be derived for enums",
        ));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ScalarEnum requires at least one variant",
        ));
    }
    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "ScalarEnum variants cannot carry fields",
            ));
        }
        let name = parse_variant_rename(&variant.attrs)?
            .unwrap_or_else(|| variant.ident.unraw().to_string());
        variants.push(EnumVariant {
            ident: variant.ident.clone(),
            name,
        });
    }
    Ok(ScalarEnumInput {
        ident: input.ident.clone(),
        crate_path: parse_enum_crate(&input.attrs)?,
        variants,
        positional: data.variants.iter().all(|v| v.discriminant.is_none()),
    })
}
