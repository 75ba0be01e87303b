use super::derived_trait_names;
use fxhash::FxHashMap;
use proc_macro2::{Literal, Span, TokenStream};
use quote::quote;
use syn::{Expr, ExprLit, ExprUnary, Fields, Ident, ItemEnum, Lit, LitStr, UnOp, Variant};

const SENTINEL_IDENT: &str = "Unrecognized";
const SENTINEL_NAME: &str = "UNRECOGNIZED";
const ZERO_SUFFIX: &str = "_UNSPECIFIED";

/// One declared vocabulary member after validation.
struct WireVariant {
    ident: Ident,
    ordinal: i32,
    name: String,
    span: Span,
}

/// Expands the `#[wire_enum]` attribute macro.
pub fn expand_wire_enum(args: TokenStream, input: ItemEnum) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new_spanned(args, "wire_enum takes no arguments").to_compile_error();
    }
    expand(input).unwrap_or_else(syn::Error::into_compile_error)
}

pub(crate) fn expand(mut input: ItemEnum) -> syn::Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "wire_enum vocabularies cannot be generic",
        ));
    }

    let variants =
        input.variants.iter_mut().map(parse_variant).collect::<syn::Result<Vec<_>>>()?;
    let zero = validate(&input.ident, &variants)?;

    let ident = &input.ident;
    let vis = &input.vis;
    let attrs = &input.attrs;
    let declared = &input.variants;
    let type_name = LitStr::new(&ident.to_string(), ident.span());
    let zero_ident = &zero.ident;

    let idents: Vec<&Ident> = variants.iter().map(|v| &v.ident).collect();
    let names: Vec<LitStr> = variants.iter().map(|v| LitStr::new(&v.name, v.span)).collect();
    let ordinals: Vec<Literal> = variants.iter().map(|v| Literal::i32_unsuffixed(v.ordinal)).collect();

    let derived = derived_trait_names(attrs);
    let missing: Vec<Ident> = ["Debug", "Clone", "Copy", "PartialEq", "Eq", "Hash"]
        .into_iter()
        .filter(|name| !derived.contains(*name))
        .map(|name| Ident::new(name, Span::call_site()))
        .collect();
    let derive_attr = if missing.is_empty() { quote!() } else { quote! { #[derive(#(#missing),*)] } };

    let codec = quote! { ::dbm_domain::codec };
    let serde = quote! { ::dbm_domain::__private::serde };

    Ok(quote! {
        #(#attrs)*
        #derive_attr
        #[repr(i32)]
        #vis enum #ident {
            /// Present on the wire but not recognized by this build.
            Unrecognized = -1,
            #declared
        }

        #[automatically_derived]
        impl #codec::WireEnum for #ident {
            const TYPE_NAME: &'static str = #type_name;
            const UNSPECIFIED: Self = Self::#zero_ident;
            const UNRECOGNIZED: Self = Self::Unrecognized;
            const VARIANTS: &'static [Self] = &[#(Self::#idents),*];

            #[inline]
            fn ordinal(self) -> i32 {
                self as i32
            }

            fn name(self) -> &'static str {
                match self {
                    Self::Unrecognized => #codec::UNRECOGNIZED,
                    #(Self::#idents => #names,)*
                }
            }

            fn from_ordinal(ordinal: i32) -> ::core::option::Option<Self> {
                match ordinal {
                    -1 => ::core::option::Option::Some(Self::Unrecognized),
                    #(#ordinals => ::core::option::Option::Some(Self::#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #SENTINEL_NAME => ::core::option::Option::Some(Self::Unrecognized),
                    #(#names => ::core::option::Option::Some(Self::#idents),)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        #[automatically_derived]
        impl #serde::Serialize for #ident {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: #serde::Serializer,
            {
                #codec::serialize(self, serializer)
            }
        }

        #[automatically_derived]
        impl<'de> #serde::Deserialize<'de> for #ident {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: #serde::Deserializer<'de>,
            {
                #codec::deserialize(deserializer)
            }
        }

        impl ::core::default::Default for #ident {
            #[inline]
            fn default() -> Self {
                Self::#zero_ident
            }
        }

        impl ::core::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(<Self as #codec::WireEnum>::name(*self))
            }
        }

        impl ::core::str::FromStr for #ident {
            type Err = ::core::convert::Infallible;

            #[inline]
            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::core::result::Result::Ok(<Self as #codec::WireEnum>::decode(s))
            }
        }

        impl ::core::convert::From<i32> for #ident {
            #[inline]
            fn from(ordinal: i32) -> Self {
                <Self as #codec::WireEnum>::decode(ordinal)
            }
        }

        impl ::core::convert::From<#ident> for i32 {
            #[inline]
            fn from(value: #ident) -> Self {
                value as Self
            }
        }
    })
}

fn parse_variant(variant: &mut Variant) -> syn::Result<WireVariant> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(syn::Error::new_spanned(&variant.fields, "wire_enum variants must be unit variants"));
    }
    if variant.ident == SENTINEL_IDENT {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "`Unrecognized` is generated by wire_enum and must not be declared",
        ));
    }

    let Some((_, expr)) = &variant.discriminant else {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "wire_enum variants need an explicit ordinal, e.g. `Active = 1`",
        ));
    };
    let ordinal = parse_ordinal(expr)?;

    let mut rename = None;
    let mut kept = Vec::with_capacity(variant.attrs.len());
    for attr in variant.attrs.drain(..) {
        if !attr.path().is_ident("wire") {
            kept.push(attr);
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                rename = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported wire attribute, expected `name = \"...\"`"))
            }
        })?;
    }
    variant.attrs = kept;

    let (name, span) = match rename {
        Some(lit) => (lit.value(), lit.span()),
        None => (screaming_snake_case(&variant.ident.to_string()), variant.ident.span()),
    };
    if !is_wire_name(&name) {
        return Err(syn::Error::new(span, format!("`{name}` is not a SCREAMING_SNAKE_CASE wire name")));
    }
    if name == SENTINEL_NAME {
        return Err(syn::Error::new(span, "`UNRECOGNIZED` is reserved for the generated sentinel"));
    }

    Ok(WireVariant { ident: variant.ident.clone(), ordinal, name, span })
}

fn parse_ordinal(expr: &Expr) -> syn::Result<i32> {
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Int(int), .. }) => int.base10_parse::<i32>(),
        Expr::Unary(ExprUnary { op: UnOp::Neg(_), .. }) => Err(syn::Error::new_spanned(
            expr,
            "wire_enum ordinals must be non-negative; -1 is reserved for UNRECOGNIZED",
        )),
        _ => Err(syn::Error::new_spanned(expr, "wire_enum ordinals must be integer literals")),
    }
}

fn validate<'a>(ident: &Ident, variants: &'a [WireVariant]) -> syn::Result<&'a WireVariant> {
    let mut ordinals: FxHashMap<i32, &Ident> = FxHashMap::default();
    let mut names: FxHashMap<&str, &Ident> = FxHashMap::default();

    for variant in variants {
        if let Some(previous) = ordinals.insert(variant.ordinal, &variant.ident) {
            return Err(syn::Error::new(
                variant.span,
                format!("ordinal {} is already used by `{previous}`", variant.ordinal),
            ));
        }
        if let Some(previous) = names.insert(variant.name.as_str(), &variant.ident) {
            return Err(syn::Error::new(
                variant.span,
                format!("wire name `{}` is already used by `{previous}`", variant.name),
            ));
        }
    }

    let Some(zero) = variants.iter().find(|v| v.ordinal == 0) else {
        return Err(syn::Error::new_spanned(
            ident,
            "wire_enum vocabularies need an ordinal-0 `..._UNSPECIFIED` variant",
        ));
    };
    if !zero.name.ends_with(ZERO_SUFFIX) || zero.name.len() == ZERO_SUFFIX.len() {
        return Err(syn::Error::new(
            zero.span,
            format!("the ordinal-0 variant must be named `<PREFIX>{ZERO_SUFFIX}`, found `{}`", zero.name),
        ));
    }

    Ok(zero)
}

fn is_wire_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// `OceanbaseOracle` -> `OCEANBASE_ORACLE`, `HTTPServer` -> `HTTP_SERVER`.
pub(crate) fn screaming_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }

    out
}
