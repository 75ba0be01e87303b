//! Instance store slice.
//!
//! Holds the database instances known to the client. Deleting an instance only flips its
//! [`State`] to `Deleted`; the record stays addressable and can be restored.
mod error;

pub use crate::error::{InstanceError, InstanceErrorExt};
use crate::error::Result;
use dbm_domain::codec::expect_object;
use dbm_domain::vocab::{Engine, State};
use dbm_kernel::registry::InitializedSlice;
use fxhash::{FxHashMap, FxHashSet};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A registered database instance.
///
/// Enum fields travel as canonical names on the wire; missing fields fall back to their
/// defaults, so an absent `engine` reads as `ENGINE_UNSPECIFIED`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Instance {
    /// Resource name, unique within the slice.
    pub name: String,
    pub title: String,
    pub engine: Engine,
    pub state: State,
    pub external_link: String,
}

impl Instance {
    /// Parses an instance from a wire payload.
    ///
    /// # Errors
    /// Returns [`InstanceError::Payload`] if the payload is not an instance object.
    pub fn from_json(payload: &Value) -> Result<Self> {
        expect_object(payload, "an instance object").context("Decoding instance")?;
        Self::deserialize(payload).context("Decoding instance")
    }

    /// Writes the instance back to its wire shape.
    ///
    /// # Errors
    /// Returns [`InstanceError::Payload`] if serialization fails.
    pub fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self).context("Encoding instance")
    }
}

/// Instance slice inner state.
#[dbm_derive::dbm_slice(
    name = "instance",
    entities(Instance),
    actions(upsert_instance, upsert_instance_json, delete_instance, restore_instance),
    selectors(get_instance, list_instances, instances_by_engine, live_instance_names)
)]
pub struct InstanceStore {
    instances: RwLock<FxHashMap<String, Instance>>,
}

impl Default for InstanceStore {
    fn default() -> Self {
        Self::new(InstanceStoreInner { instances: RwLock::default() })
    }
}

impl InstanceStore {
    /// Inserts or replaces an instance, keyed by name.
    ///
    /// # Errors
    /// Returns [`InstanceError::Invalid`] if the instance has no name.
    pub fn upsert_instance(&self, instance: Instance) -> Result<Instance> {
        if instance.name.trim().is_empty() {
            return Err(InstanceError::Invalid { message: "name is required".into(), context: None });
        }

        debug!(instance = %instance.name, engine = %instance.engine, state = %instance.state, "Instance upserted");
        self.instances.write().insert(instance.name.clone(), instance.clone());
        Ok(instance)
    }

    /// Decodes a wire payload and upserts it.
    ///
    /// # Errors
    /// Returns [`InstanceError::Payload`] for a malformed payload, otherwise the errors of
    /// [`Self::upsert_instance`].
    pub fn upsert_instance_json(&self, payload: &Value) -> Result<Instance> {
        self.upsert_instance(Instance::from_json(payload)?)
    }

    /// Marks an instance as deleted.
    ///
    /// # Errors
    /// Returns [`InstanceError::NotFound`] for an unknown name.
    pub fn delete_instance(&self, name: &str) -> Result<Instance> {
        self.set_state(name, State::Deleted)
    }

    /// Brings a deleted instance back to `Active`.
    ///
    /// # Errors
    /// Returns [`InstanceError::NotFound`] for an unknown name.
    pub fn restore_instance(&self, name: &str) -> Result<Instance> {
        self.set_state(name, State::Active)
    }

    #[must_use]
    pub fn get_instance(&self, name: &str) -> Option<Instance> {
        self.instances.read().get(name).cloned()
    }

    /// Instances sorted by name; deleted ones only when `show_deleted` is set.
    #[must_use]
    pub fn list_instances(&self, show_deleted: bool) -> Vec<Instance> {
        self.collect(|i| show_deleted || i.state != State::Deleted)
    }

    /// Live instances running `engine`, sorted by name.
    #[must_use]
    pub fn instances_by_engine(&self, engine: Engine) -> Vec<Instance> {
        self.collect(|i| i.engine == engine && i.state != State::Deleted)
    }

    /// Names of every instance that is not deleted.
    #[must_use]
    pub fn live_instance_names(&self) -> FxHashSet<String> {
        self.instances
            .read()
            .values()
            .filter(|i| i.state != State::Deleted)
            .map(|i| i.name.clone())
            .collect()
    }

    fn set_state(&self, name: &str, state: State) -> Result<Instance> {
        let mut instances = self.instances.write();
        let Some(instance) = instances.get_mut(name) else {
            return Err(InstanceError::NotFound { name: name.to_owned(), context: None });
        };

        instance.state = state;
        debug!(instance = name, state = %state, "Instance state changed");
        Ok(instance.clone())
    }

    fn collect(&self, keep: impl Fn(&Instance) -> bool) -> Vec<Instance> {
        let mut found: Vec<_> = self.instances.read().values().filter(|i| keep(i)).cloned().collect();
        found.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        found
    }
}

/// Initialize the instance slice.
///
/// # Errors
/// Infallible today; the signature matches the other slices.
pub fn init() -> Result<InitializedSlice> {
    tracing::info!("Instance slice initialized");

    Ok(InitializedSlice::new(InstanceStore::default()))
}
