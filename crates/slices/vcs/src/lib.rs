//! Version-control provider store slice.
mod error;

pub use crate::error::{VcsError, VcsErrorExt};
use crate::error::Result;
use dbm_domain::codec::expect_object;
use dbm_domain::vocab::VcsType;
use dbm_kernel::registry::InitializedSlice;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A connected version-control provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VcsProvider {
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub vcs_type: VcsType,
    /// Base URL of the provider, e.g. a self-hosted GitLab.
    pub url: String,
}

impl VcsProvider {
    /// # Errors
    /// Returns [`VcsError::Payload`] if the payload is not a provider object.
    pub fn from_json(payload: &Value) -> Result<Self> {
        expect_object(payload, "a VCS provider object").context("Decoding VCS provider")?;
        Self::deserialize(payload).context("Decoding VCS provider")
    }

    /// # Errors
    /// Returns [`VcsError::Payload`] if serialization fails.
    pub fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self).context("Encoding VCS provider")
    }
}

/// VCS slice inner state.
#[dbm_derive::dbm_slice(
    name = "vcs",
    entities(VcsProvider),
    actions(upsert_vcs_provider, upsert_vcs_provider_json),
    selectors(get_vcs_provider, list_vcs_providers)
)]
pub struct VcsStore {
    providers: RwLock<FxHashMap<String, VcsProvider>>,
}

impl Default for VcsStore {
    fn default() -> Self {
        Self::new(VcsStoreInner { providers: RwLock::default() })
    }
}

impl VcsStore {
    /// # Errors
    /// Returns [`VcsError::Invalid`] if the provider has no name.
    pub fn upsert_vcs_provider(&self, provider: VcsProvider) -> Result<VcsProvider> {
        if provider.name.trim().is_empty() {
            return Err(VcsError::Invalid { message: "name is required".into(), context: None });
        }

        debug!(provider = %provider.name, vcs_type = %provider.vcs_type, "VCS provider upserted");
        self.providers.write().insert(provider.name.clone(), provider.clone());
        Ok(provider)
    }

    /// # Errors
    /// Returns [`VcsError::Payload`] for a malformed payload, otherwise the errors of
    /// [`Self::upsert_vcs_provider`].
    pub fn upsert_vcs_provider_json(&self, payload: &Value) -> Result<VcsProvider> {
        self.upsert_vcs_provider(VcsProvider::from_json(payload)?)
    }

    #[must_use]
    pub fn get_vcs_provider(&self, name: &str) -> Option<VcsProvider> {
        self.providers.read().get(name).cloned()
    }

    /// Providers sorted by name.
    #[must_use]
    pub fn list_vcs_providers(&self) -> Vec<VcsProvider> {
        let mut providers: Vec<_> = self.providers.read().values().cloned().collect();
        providers.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        providers
    }
}

/// Initialize the VCS slice.
///
/// # Errors
/// Infallible today; the signature matches the other slices.
pub fn init() -> Result<InitializedSlice> {
    tracing::info!("VCS slice initialized");

    Ok(InitializedSlice::new(VcsStore::default()))
}
