//! Facade crate for the `dbm` client contract layer.
//! Re-exports the vocabularies, the codec and the registry, and composes every store slice.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`init`] once at startup; it fails if two slices export the same binding.
//! - Reach a slice through [`Registry::slice`], e.g. `registry.slice::<store::InstanceStore>()`.
//!
//! Every re-export below is spelled out. Adding a slice means adding its names here, to
//! [`SLICES`] and to the compile-time uniqueness check.

use std::borrow::Cow;
use tracing::info;

pub use dbm_domain as domain;
pub use dbm_domain::codec::{UNRECOGNIZED, WireEnum, WireValue};
pub use dbm_domain::vocab::{Engine, ExportFormat, MaskingLevel, State, VcsType, Vocabulary};
pub use dbm_kernel as kernel;
pub use dbm_kernel::registry::{Binding, Export, ExportKind, Registry, RegistryError};

/// Store slices and the entities they own.
pub mod store {
    pub use dbm_database::{Database, DatabaseError, DatabaseFind, DatabasePatch, DatabaseStore};
    pub use dbm_export::{ExportError, ExportRequest, ExportStore, QueuedExport};
    pub use dbm_instance::{Instance, InstanceError, InstanceStore};
    pub use dbm_policy::{MaskingPolicy, PolicyError, PolicyStore};
    pub use dbm_vcs::{VcsError, VcsProvider, VcsStore};
}

use store::{
    DatabaseError, DatabaseStore, ExportError, ExportStore, InstanceError, InstanceStore,
    PolicyError, PolicyStore, VcsError, VcsStore,
};

/// Slice names in registration order.
pub const SLICES: &[&str] = &[
    InstanceStore::NAME,
    DatabaseStore::NAME,
    VcsStore::NAME,
    PolicyStore::NAME,
    ExportStore::NAME,
];

const _: () = assert!(
    kernel::registry::exports_are_unique(&[
        InstanceStore::EXPORTS,
        DatabaseStore::EXPORTS,
        VcsStore::EXPORTS,
        PolicyStore::EXPORTS,
        ExportStore::EXPORTS,
    ]),
    "two store slices export the same binding name"
);

/// Facade error type.
#[dbm_derive::dbm_error]
pub enum DbmError {
    #[error("Instance slice error{}: {source}", format_context(.context))]
    Instance { source: InstanceError, context: Option<Cow<'static, str>> },

    #[error("Database slice error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("VCS slice error{}: {source}", format_context(.context))]
    Vcs { source: VcsError, context: Option<Cow<'static, str>> },

    #[error("Policy slice error{}: {source}", format_context(.context))]
    Policy { source: PolicyError, context: Option<Cow<'static, str>> },

    #[error("Export slice error{}: {source}", format_context(.context))]
    Export { source: ExportError, context: Option<Cow<'static, str>> },

    #[error("Registry error{}: {source}", format_context(.context))]
    Registry { source: RegistryError, context: Option<Cow<'static, str>> },
}

/// Initialize every store slice and compose the registry.
///
/// # Errors
/// Returns an error if a slice fails to initialize or the registry rejects the slices.
pub fn init() -> Result<Registry> {
    let registry = Registry::builder()
        .register(dbm_instance::init()?)
        .register(dbm_database::init()?)
        .register(dbm_vcs::init()?)
        .register(dbm_policy::init()?)
        .register(dbm_export::init()?)
        .build()
        .context("Composing store slices")?;

    info!(slices = SLICES.len(), bindings = registry.len(), "Client store ready");
    Ok(registry)
}
