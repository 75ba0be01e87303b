#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the contract layer.
//! This crate generates the boilerplate behind wire vocabularies, error enums and store
//! slices so each of them is declared once, in plain Rust, next to the code that owns it.
//!
//! Generated code refers to `::dbm_domain` (vocabularies), `::dbm_kernel` (slices) and
//! `::thiserror` (errors), so consuming crates must depend on those.
//!
//! See each macro’s docstring for examples; they are `ignore`d to avoid compiling in this crate.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemEnum, ItemStruct, parse_macro_input};

/// Attribute macro that turns a fieldless enum into a forward-compatible wire vocabulary.
///
/// Every variant must carry an explicit, non-negative ordinal. Its wire name is the
/// `SCREAMING_SNAKE_CASE` form of the variant ident unless overridden with
/// `#[wire(name = "...")]`. Exactly one variant must have ordinal `0`, and its wire name
/// must end in `_UNSPECIFIED`.
///
/// # Generated Items
///
/// * An `Unrecognized = -1` sentinel variant (declaring it yourself is an error).
/// * `#[repr(i32)]` plus `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash` when missing.
/// * `dbm_domain::codec::WireEnum` with static ordinal and name tables.
/// * `Serialize` (canonical name) and a `Deserialize` that never rejects a value.
/// * `Default` (the zero value), `Display`, `FromStr`, `From<i32>` and `From<Self> for i32`.
///
/// # Errors
/// Emits a compile-time error for missing or negative ordinals, duplicate ordinals or
/// names, a missing or misnamed zero value, and data-carrying variants.
///
/// # Example
///
/// ```rust,ignore
/// #[dbm_derive::wire_enum]
/// pub enum ExportFormat {
///     #[wire(name = "FORMAT_UNSPECIFIED")]
///     Unspecified = 0,
///     Csv = 1,
///     Json = 2,
/// }
///
/// assert_eq!(ExportFormat::decode("CSV"), ExportFormat::Csv);
/// assert_eq!(ExportFormat::decode(42), ExportFormat::Unrecognized);
/// ```
#[proc_macro_attribute]
pub fn wire_enum(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemEnum);
    macros::wire_enum::expand_wire_enum(args.into(), input).into()
}

/// A high-level attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Type Aliasing**: Creates a `Result<T>` alias for the enum in the same module.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a source field.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Variants that support context include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping upstream errors include a `source` field (or `#[source]`/`#[from]`),
///    and must then also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[dbm_derive::dbm_error]
/// pub enum InstanceError {
///     #[error("Malformed instance payload{}: {source}", format_context(.context))]
///     Payload { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal instance error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn dbm_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_error(input).into()
}

/// Attribute macro to define a store slice handle.
///
/// This macro transforms a struct into the slice pattern:
/// 1. The declared fields move into a `<Name>Inner` struct.
/// 2. `<Name>` becomes a cheap-to-clone `Arc` handle that derefs to the inner state.
/// 3. `dbm_kernel::registry::StoreSlice` is implemented with the declared name and exports.
///
/// Every listed entity must be a type in scope, and every action or selector an inherent
/// method of the handle; a misspelled export fails to compile.
///
/// # Example
/// ```rust,ignore
/// #[dbm_derive::dbm_slice(
///     name = "vcs",
///     entities(VcsProvider),
///     actions(upsert_vcs_provider),
///     selectors(get_vcs_provider),
/// )]
/// pub struct VcsStore {
///     providers: RwLock<FxHashMap<String, VcsProvider>>,
/// }
/// ```
#[proc_macro_attribute]
pub fn dbm_slice(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(args.into(), input).into()
}
