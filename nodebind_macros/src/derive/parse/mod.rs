//! Attribute parsing for the `Target` and `ScalarEnum` derives.
//!
//! Every `#[bind(...)]` and `#[scalar(...)]` key is checked; an unknown key
//! is a compile error so a misspelt flag cannot silently change binding.

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::{Span, TokenStream};
use syn::meta::ParseNestedMeta;
use syn::parse::Parser;
use syn::{Attribute, LitStr, parenthesized, token};

mod input;
mod literals;
mod type_utils;

pub(crate) use input::{
    Member, MemberRole, ScalarEnumInput, TargetInput, parse_scalar_enum_input, parse_target_input,
};
use literals::{flag, lit_str};
pub(crate) use type_utils::option_inner;

/// Key convention applied to field names by `rename_all`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RenameRule {
    Camel,
    Pascal,
    Snake,
    Kebab,
    Lower,
}

impl RenameRule {
    pub(crate) fn parse(s: &str, span: Span) -> syn::Result<Self> {
        match s {
            "camelCase" => Ok(Self::Camel),
            "PascalCase" => Ok(Self::Pascal),
            "snake_case" => Ok(Self::Snake),
            "kebab-case" => Ok(Self::Kebab),
            "lowercase" => Ok(Self::Lower),
            _ => Err(syn::Error::new(
                span,
                format!(
                    "unknown rename_all '{s}'; expected one of \"camelCase\", \"PascalCase\", \
                     \"snake_case\", \"kebab-case\" or \"lowercase\""
                ),
            )),
        }
    }

    pub(crate) fn apply(self, name: &str) -> String {
        match self {
            Self::Camel => name.to_lower_camel_case(),
            Self::Pascal => name.to_upper_camel_case(),
            Self::Snake => name.to_snake_case(),
            Self::Kebab => name.to_kebab_case(),
            Self::Lower => name.to_lowercase().replace('_', ""),
        }
    }
}

/// Struct-level `#[bind(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    pub hooks: bool,
    pub scalar: bool,
    pub rename_all: Option<RenameRule>,
    /// Overrides the runtime crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Entry shape named by `kind = "..."`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KindAttr {
    Scalar,
    Node,
}

impl KindAttr {
    fn parse(s: &LitStr) -> syn::Result<Self> {
        match s.value().as_str() {
            "scalar" => Ok(Self::Scalar),
            "node" => Ok(Self::Node),
            other => Err(syn::Error::new(
                s.span(),
                format!("unknown kind '{other}'; expected \"scalar\" or \"node\""),
            )),
        }
    }
}

/// How collection child names are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Significance {
    #[default]
    None,
    Type,
    Key,
}

impl Significance {
    fn parse(s: &LitStr) -> syn::Result<Self> {
        match s.value().as_str() {
            "none" => Ok(Self::None),
            "type" => Ok(Self::Type),
            "key" => Ok(Self::Key),
            other => Err(syn::Error::new(
                s.span(),
                format!("unknown significance '{other}'; expected \"none\", \"type\" or \"key\""),
            )),
        }
    }
}

/// Contents of `collection(...)`.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CollectionAttrs {
    pub significance: Significance,
    pub prefix: Option<String>,
    pub element: Option<String>,
}

/// Field-level `#[bind(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub key: Option<LitStr>,
    pub required: bool,
    pub merge: bool,
    pub early: bool,
    pub kind: Option<KindAttr>,
    pub join: Option<String>,
    pub identity: bool,
    pub flatten: bool,
    pub skip: bool,
    pub collection: Option<CollectionAttrs>,
}

impl FieldAttrs {
    /// Whether any attribute that shapes a bound member is set.
    const fn shapes_member(&self) -> bool {
        self.key.is_some()
            || self.required
            || self.merge
            || self.early
            || self.kind.is_some()
            || self.join.is_some()
            || self.identity
            || self.collection.is_some()
    }
}

/// Iterates every attribute named `name` and feeds its nested metas to `f`.
fn for_each_meta<F>(attrs: &[Attribute], name: &str, mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident(name)) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn meta_ident(meta: &ParseNestedMeta) -> Option<String> {
    meta.path.get_ident().map(ToString::to_string)
}

fn parse_crate_path(meta: &ParseNestedMeta) -> syn::Result<syn::Path> {
    let s = lit_str(meta, "crate")?;
    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))
}

/// Extracts `#[bind(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    for_each_meta(attrs, "bind", |meta| {
        match meta_ident(meta).as_deref() {
            Some("hooks") => out.hooks = flag(meta)?,
            Some("scalar") => out.scalar = flag(meta)?,
            Some("rename_all") => {
                let s = lit_str(meta, "rename_all")?;
                out.rename_all = Some(RenameRule::parse(&s.value(), s.span())?);
            }
            Some("crate") => out.crate_path = Some(parse_crate_path(meta)?),
            _ => return Err(meta.error("unknown struct-level bind attribute")),
        }
        Ok(())
    })?;
    Ok(out)
}

fn parse_collection(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    let mut collection = CollectionAttrs::default();
    if meta.input.peek(token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        let body: TokenStream = content.parse()?;
        syn::meta::parser(|nested| {
            match meta_ident(&nested).as_deref() {
                Some("key") => set_key(out, lit_str(&nested, "key")?)?,
                Some("significance") => {
                    collection.significance =
                        Significance::parse(&lit_str(&nested, "significance")?)?;
                }
                Some("prefix") => collection.prefix = Some(lit_str(&nested, "prefix")?.value()),
                Some("element") => collection.element = Some(lit_str(&nested, "element")?.value()),
                _ => return Err(nested.error("unknown collection attribute")),
            }
            Ok(())
        })
        .parse2(body)?;
    }
    out.collection = Some(collection);
    Ok(())
}

fn set_key(out: &mut FieldAttrs, key: LitStr) -> syn::Result<()> {
    if out.key.is_some() {
        return Err(syn::Error::new(key.span(), "key is set more than once"));
    }
    out.key = Some(key);
    Ok(())
}

fn apply_field_attr(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    match meta_ident(meta).as_deref() {
        Some("key") => set_key(out, lit_str(meta, "key")?)?,
        Some("required") => out.required = flag(meta)?,
        Some("merge") => out.merge = flag(meta)?,
        Some("early") => out.early = flag(meta)?,
        Some("kind") => out.kind = Some(KindAttr::parse(&lit_str(meta, "kind")?)?),
        Some("join") => out.join = Some(lit_str(meta, "join")?.value()),
        Some("identity") => out.identity = flag(meta)?,
        Some("flatten") => out.flatten = flag(meta)?,
        Some("skip") => out.skip = flag(meta)?,
        Some("collection") => parse_collection(meta, out)?,
        _ => return Err(meta.error("unknown field-level bind attribute")),
    }
    Ok(())
}

/// Parses and cross-checks field-level `#[bind(...)]` attributes.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for_each_meta(&field.attrs, "bind", |meta| apply_field_attr(meta, &mut out))?;
    let conflict = |message: &str| Err(syn::Error::new_spanned(field, message));
    if out.skip && (out.flatten || out.shapes_member()) {
        return conflict("skip cannot be combined with other bind attributes");
    }
    if out.flatten && out.shapes_member() {
        return conflict("flatten cannot be combined with other bind attributes");
    }
    if out.collection.is_some() && (out.kind.is_some() || out.join.is_some()) {
        return conflict("collection members cannot set kind or join");
    }
    if out.collection.is_some() && out.identity {
        return conflict("a collection cannot be the identity member");
    }
    if out.join.is_some() && out.kind == Some(KindAttr::Node) {
        return conflict("join only applies to scalar entries");
    }
    Ok(out)
}

/// Parses the `#[scalar(rename = "...")]` attribute of an enum variant.
pub(crate) fn parse_variant_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;
    for_each_meta(attrs, "scalar", |meta| {
        match meta_ident(meta).as_deref() {
            Some("rename") => rename = Some(lit_str(meta, "rename")?.value()),
            _ => return Err(meta.error("unknown variant-level scalar attribute")),
        }
        Ok(())
    })?;
    Ok(rename)
}

/// Parses the `#[scalar(crate = "...")]` attribute of an enum.
pub(crate) fn parse_enum_crate(attrs: &[Attribute]) -> syn::Result<Option<syn::Path>> {
    let mut crate_path = None;
    for_each_meta(attrs, "scalar", |meta| {
        match meta_ident(meta).as_deref() {
            Some("crate") => crate_path = Some(parse_crate_path(meta)?),
            _ => return Err(meta.error("unknown enum-level scalar attribute")),
        }
        Ok(())
    })?;
    Ok(crate_path)
}
