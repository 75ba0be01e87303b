//! Data-masking policy store slice.
//!
//! Masking levels are tracked per column. A column without a policy resolves to
//! `MASKING_LEVEL_UNSPECIFIED`, leaving the decision to whatever sits above the client.
mod error;

pub use crate::error::{PolicyError, PolicyErrorExt};
use crate::error::Result;
use dbm_domain::codec::expect_object;
use dbm_domain::vocab::MaskingLevel;
use dbm_kernel::registry::InitializedSlice;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

type ColumnKey = (String, String, String);

/// Masking level applied to one column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaskingPolicy {
    pub database: String,
    pub table: String,
    pub column: String,
    pub level: MaskingLevel,
}

impl MaskingPolicy {
    /// # Errors
    /// Returns [`PolicyError::Payload`] if the payload is not a policy object.
    pub fn from_json(payload: &Value) -> Result<Self> {
        expect_object(payload, "a masking policy object").context("Decoding masking policy")?;
        Self::deserialize(payload).context("Decoding masking policy")
    }

    /// # Errors
    /// Returns [`PolicyError::Payload`] if serialization fails.
    pub fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self).context("Encoding masking policy")
    }

    fn key(&self) -> ColumnKey {
        (self.database.clone(), self.table.clone(), self.column.clone())
    }
}

/// Policy slice inner state.
#[dbm_derive::dbm_slice(
    name = "policy",
    entities(MaskingPolicy),
    actions(set_masking_level, clear_masking_level),
    selectors(masking_level_for, list_masking_policies)
)]
pub struct PolicyStore {
    policies: RwLock<FxHashMap<ColumnKey, MaskingPolicy>>,
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::new(PolicyStoreInner { policies: RwLock::default() })
    }
}

impl PolicyStore {
    /// Sets the level for a column, replacing any earlier policy.
    ///
    /// Unrecognized levels are stored as given; they still write back as `UNRECOGNIZED`.
    ///
    /// # Errors
    /// Returns [`PolicyError::Invalid`] if database, table, or column is empty.
    pub fn set_masking_level(&self, policy: MaskingPolicy) -> Result<MaskingPolicy> {
        if [&policy.database, &policy.table, &policy.column].iter().any(|part| part.trim().is_empty()) {
            return Err(PolicyError::Invalid {
                message: "database, table and column are required".into(),
                context: None,
            });
        }

        debug!(
            database = %policy.database,
            table = %policy.table,
            column = %policy.column,
            level = %policy.level,
            "Masking level set"
        );
        self.policies.write().insert(policy.key(), policy.clone());
        Ok(policy)
    }

    /// Removes the column's policy, returning it if one existed.
    pub fn clear_masking_level(&self, database: &str, table: &str, column: &str) -> Option<MaskingPolicy> {
        let removed = self.policies.write().remove(&(database.to_owned(), table.to_owned(), column.to_owned()));
        if removed.is_some() {
            debug!(database, table, column, "Masking level cleared");
        }
        removed
    }

    #[must_use]
    pub fn masking_level_for(&self, database: &str, table: &str, column: &str) -> MaskingLevel {
        self.policies
            .read()
            .get(&(database.to_owned(), table.to_owned(), column.to_owned()))
            .map_or(MaskingLevel::Unspecified, |p| p.level)
    }

    /// Policies of one database, sorted by table then column.
    #[must_use]
    pub fn list_masking_policies(&self, database: &str) -> Vec<MaskingPolicy> {
        let mut policies: Vec<_> =
            self.policies.read().values().filter(|p| p.database == database).cloned().collect();
        policies.sort_unstable_by(|a, b| (&a.table, &a.column).cmp(&(&b.table, &b.column)));
        policies
    }
}

/// Initialize the policy slice.
///
/// # Errors
/// Infallible today; the signature matches the other slices.
pub fn init() -> Result<InitializedSlice> {
    tracing::info!("Policy slice initialized");

    Ok(InitializedSlice::new(PolicyStore::default()))
}
