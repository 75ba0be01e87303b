use super::derived_trait_names;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::{Fields, Ident, ItemStruct, LitStr};

#[derive(Default)]
struct SliceArgs {
    name: Option<LitStr>,
    entities: Vec<Ident>,
    actions: Vec<Ident>,
    selectors: Vec<Ident>,
}

/// Expands the `#[dbm_slice]` attribute macro.
pub fn expand_slice(args: TokenStream, input: ItemStruct) -> TokenStream {
    expand(args, input).unwrap_or_else(syn::Error::into_compile_error)
}

fn parse_args(args: TokenStream) -> syn::Result<SliceArgs> {
    let mut parsed = SliceArgs::default();

    let parser = syn::meta::parser(|meta| {
        let list = if meta.path.is_ident("name") {
            parsed.name = Some(meta.value()?.parse()?);
            return Ok(());
        } else if meta.path.is_ident("entities") {
            &mut parsed.entities
        } else if meta.path.is_ident("actions") {
            &mut parsed.actions
        } else if meta.path.is_ident("selectors") {
            &mut parsed.selectors
        } else {
            return Err(meta.error("expected `name`, `entities`, `actions` or `selectors`"));
        };
        meta.parse_nested_meta(|item| {
            list.push(item.path.require_ident()?.clone());
            Ok(())
        })
    });
    parser.parse2(args)?;

    Ok(parsed)
}

fn expand(args: TokenStream, input: ItemStruct) -> syn::Result<TokenStream> {
    let args = parse_args(args)?;
    let Some(name) = args.name else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "dbm_slice requires a slice name, e.g. `#[dbm_slice(name = \"instance\")]`",
        ));
    };
    if name.value().trim().is_empty() {
        return Err(syn::Error::new_spanned(&name, "slice name cannot be empty"));
    }

    let wrapper = &input.ident;
    let vis = &input.vis;
    let attrs = &input.attrs;
    let inner_debug =
        if derived_trait_names(attrs).contains("Debug") { quote!() } else { quote! { #[derive(Debug)] } };
    let fields = &input.fields;
    let inner = format_ident!("{wrapper}Inner");
    let terminator = if matches!(fields, Fields::Named(_)) { quote!() } else { quote!(;) };

    let registry = quote! { ::dbm_kernel::registry };
    let exports = args
        .entities
        .iter()
        .map(|i| (i, quote!(entity)))
        .chain(args.actions.iter().map(|i| (i, quote!(action))))
        .chain(args.selectors.iter().map(|i| (i, quote!(selector))))
        .map(|(ident, kind)| {
            let lit = LitStr::new(&ident.to_string(), ident.span());
            quote! { #registry::Export::#kind(#lit) }
        });
    let entities = &args.entities;
    let callables = args.actions.iter().chain(&args.selectors);

    Ok(quote! {
        #(#attrs)*
        #inner_debug
        #vis struct #inner #fields #terminator

        #[derive(Debug, Clone)]
        #vis struct #wrapper {
            inner: ::std::sync::Arc<#inner>,
        }

        impl #wrapper {
            /// Slice name under which the registry publishes this slice.
            pub const NAME: &'static str = #name;

            /// Every binding this slice contributes to the registry namespace.
            pub const EXPORTS: &'static [#registry::Export] = &[#(#exports),*];

            #[must_use]
            pub fn new(inner: #inner) -> Self {
                Self { inner: ::std::sync::Arc::new(inner) }
            }
        }

        impl ::std::ops::Deref for #wrapper {
            type Target = #inner;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl #registry::StoreSlice for #wrapper {
            fn name(&self) -> &'static str {
                Self::NAME
            }

            fn exports(&self) -> &'static [#registry::Export] {
                Self::EXPORTS
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        // Every declared export must name a real item.
        const _: () = {
            #[allow(dead_code, clippy::no_effect_underscore_binding)]
            fn exports_resolve() {
                #(let _ = ::core::marker::PhantomData::<#entities>;)*
                #(let _ = #wrapper::#callables;)*
            }
        };
    })
}
