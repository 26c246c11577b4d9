//! Token generation for `#[derive(Target)]`.
//!
//! Descriptors are emitted as `const` expressions so the member table costs
//! nothing at bind time. The same expression feeds both `resolve_members`
//! and `descriptors`, keeping the two in step.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

use super::parse::{
    CollectionAttrs, KindAttr, Member, MemberRole, Significance, TargetInput, option_inner,
};

mod scalar_enum;

pub(crate) use scalar_enum::scalar_enum_impl;

fn collection_tokens(collection: &CollectionAttrs, krate: &TokenStream) -> TokenStream {
    let significance = match collection.significance {
        Significance::None => quote! { #krate::NameSignificance::None },
        Significance::Type => quote! { #krate::NameSignificance::Type },
        Significance::Key => quote! { #krate::NameSignificance::Key },
    };
    let prefix = collection
        .prefix
        .as_ref()
        .map(|p| quote! { .prefix(#p) });
    let element = collection
        .element
        .as_ref()
        .map(|e| quote! { .element(#e) });
    quote! {
        #krate::CollectionDescriptor::new().significance(#significance) #prefix #element
    }
}

/// Builds the `MemberDescriptor` expression for one bound member.
pub(crate) fn descriptor_tokens(member: &Member, krate: &TokenStream) -> TokenStream {
    let attrs = &member.attrs;
    let key = &member.key;
    let required = attrs.required.then(|| quote! { .required() });
    let merge = attrs.merge.then(|| quote! { .merge() });
    let early = attrs.early.then(|| quote! { .early() });
    let kind = attrs.kind.map(|kind| match kind {
        KindAttr::Scalar => quote! { .kind(#krate::NodeKind::Scalar) },
        KindAttr::Node => quote! { .kind(#krate::NodeKind::Node) },
    });
    let join = attrs.join.as_ref().map(|sep| quote! { .join(#sep) });
    let collection = attrs.collection.as_ref().map(|c| {
        let inner = collection_tokens(c, krate);
        quote! { .collection(#inner) }
    });
    quote! {
        #krate::MemberDescriptor::new(#key) #required #merge #early #kind #join #collection
    }
}

fn resolve_tokens(member: &Member, krate: &TokenStream) -> TokenStream {
    let ident = &member.ident;
    let descriptor = descriptor_tokens(member, krate);
    let method = if member.role == MemberRole::Collection {
        quote! { resolve_collection }
    } else {
        quote! { resolve_member }
    };
    quote! {
        binder.#method(&mut self.#ident, &const { #descriptor }, phase, node)?;
    }
}

fn identity_tokens(input: &TargetInput, krate: &TokenStream) -> TokenStream {
    if let Some(member) = input.identity() {
        let ident = &member.ident;
        let key = &member.key;
        let read = if option_inner(&member.ty).is_some() {
            quote! { self.#ident.as_deref() }
        } else {
            quote! { ::core::option::Option::Some(self.#ident.as_str()) }
        };
        return quote! {
            fn identity(&self) -> ::core::option::Option<&str> {
                #read
            }

            fn identity_key() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(#key)
            }
        };
    }
    // Without an identity field of its own, a target names itself through
    // the first target it flattens.
    input.flattened().next().map_or_else(TokenStream::new, |base| {
        let ident = &base.ident;
        let ty = &base.ty;
        quote! {
            fn identity(&self) -> ::core::option::Option<&str> {
                #krate::Target::identity(&self.#ident)
            }

            fn identity_key() -> ::core::option::Option<&'static str> {
                <#ty as #krate::Target>::identity_key()
            }
        }
    })
}

/// Generates the `Target` implementation.
pub(crate) fn target_impl(input: &TargetInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let type_name = ident.unraw().to_string();

    let flatten_resolves = input.flattened().map(|m| {
        let field = &m.ident;
        quote! {
            #krate::Target::resolve_members(&mut self.#field, phase, node, binder)?;
        }
    });
    let member_resolves = input.bound().map(|m| resolve_tokens(m, krate));
    let flatten_types = input.flattened().map(|m| &m.ty);
    let descriptors = input.bound().map(|m| descriptor_tokens(m, krate));
    let hooks = input.attrs.hooks.then(|| {
        quote! {
            fn hooks(&mut self) -> ::core::option::Option<&mut dyn #krate::LifecycleHooks> {
                ::core::option::Option::Some(self)
            }
        }
    });
    let identity = identity_tokens(input, krate);

    quote! {
        #[automatically_derived]
        impl #krate::Target for #ident {
            const TYPE_NAME: &'static str = #type_name;

            fn resolve_members(
                &mut self,
                phase: #krate::Phase,
                node: &#krate::ConfigNode,
                binder: &mut #krate::Binder<'_>,
            ) -> #krate::BindResult<()> {
                #( #flatten_resolves )*
                #( #member_resolves )*
                ::core::result::Result::Ok(())
            }

            fn descriptors() -> ::std::vec::Vec<#krate::MemberDescriptor> {
                ::core::iter::empty::<#krate::MemberDescriptor>()
                    #( .chain(<#flatten_types as #krate::Target>::descriptors()) )*
                    .chain([ #( #descriptors ),* ])
                    .collect()
            }

            #hooks
            #identity
        }
    }
}

/// Generates the `Field` implementation that lets the target nest.
pub(crate) fn field_impl(input: &TargetInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let from_scalar = input.attrs.scalar.then(|| {
        quote! {
            fn from_scalar(
                raw: &str,
            ) -> ::core::option::Option<::core::result::Result<Self, #krate::ScalarFormatError>> {
                ::core::option::Option::Some(<Self as #krate::ParseScalar>::parse_scalar(raw))
            }
        }
    });
    quote! {
        #[automatically_derived]
        impl #krate::Field for #ident {
            fn type_name() -> &'static str {
                <Self as #krate::Target>::TYPE_NAME
            }

            #from_scalar

            fn from_node(
                node: &#krate::ConfigNode,
                binder: &mut #krate::Binder<'_>,
            ) -> ::core::option::Option<#krate::BindResult<Self>> {
                ::core::option::Option::Some(binder.create::<Self>(node))
            }

            fn merge_node(
                &mut self,
                node: &#krate::ConfigNode,
                binder: &mut #krate::Binder<'_>,
            ) -> ::core::option::Option<#krate::BindResult<()>> {
                ::core::option::Option::Some(binder.bind(self, node))
            }

            fn identity(&self) -> ::core::option::Option<&str> {
                <Self as #krate::Target>::identity(self)
            }

            fn identity_key() -> ::core::option::Option<&'static str> {
                <Self as #krate::Target>::identity_key()
            }
        }
    }
}
