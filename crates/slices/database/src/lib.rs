//! Database store slice.
//!
//! Databases are addressed by their owning instance plus their own name.
mod error;

pub use crate::error::{DatabaseError, DatabaseErrorExt};
use crate::error::Result;
use dbm_domain::codec::expect_object;
use dbm_domain::vocab::{Engine, State};
use dbm_kernel::registry::InitializedSlice;
use fxhash::{FxHashMap, FxHashSet};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A database hosted on an instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Database {
    pub name: String,
    /// Name of the owning instance.
    pub instance: String,
    pub engine: Engine,
    pub state: State,
    pub schema_version: String,
    pub character_set: String,
    pub collation: String,
}

impl Database {
    /// # Errors
    /// Returns [`DatabaseError::Payload`] if the payload is not a database object.
    pub fn from_json(payload: &Value) -> Result<Self> {
        expect_object(payload, "a database object").context("Decoding database")?;
        Self::deserialize(payload).context("Decoding database")
    }

    /// # Errors
    /// Returns [`DatabaseError::Payload`] if serialization fails.
    pub fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self).context("Encoding database")
    }

    fn key(&self) -> (String, String) {
        (self.instance.clone(), self.name.clone())
    }
}

/// Partial update applied by [`DatabaseStore::patch_database`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabasePatch {
    pub state: Option<State>,
    pub schema_version: Option<String>,
}

/// Filter for [`DatabaseStore::find_databases`].
///
/// Instances live in their own slice, so the caller passes in which of them are live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseFind {
    /// Restrict to one instance. When set, every database of that instance is returned.
    pub instance: Option<String>,
    /// Names of the instances that are not archived. Without an instance filter, databases
    /// whose instance is missing from this set are dropped. `None` skips the check.
    pub live_instances: Option<FxHashSet<String>>,
}

/// Database slice inner state.
#[dbm_derive::dbm_slice(
    name = "database",
    entities(Database, DatabasePatch, DatabaseFind),
    actions(upsert_database, upsert_database_json, patch_database),
    selectors(get_database, find_databases)
)]
pub struct DatabaseStore {
    databases: RwLock<FxHashMap<(String, String), Database>>,
}

impl Default for DatabaseStore {
    fn default() -> Self {
        Self::new(DatabaseStoreInner { databases: RwLock::default() })
    }
}

impl DatabaseStore {
    /// Inserts or replaces a database, keyed by instance and name.
    ///
    /// # Errors
    /// Returns [`DatabaseError::Invalid`] if the name or owning instance is missing.
    pub fn upsert_database(&self, database: Database) -> Result<Database> {
        if database.name.trim().is_empty() {
            return Err(DatabaseError::Invalid { message: "name is required".into(), context: None });
        }
        if database.instance.trim().is_empty() {
            return Err(DatabaseError::Invalid {
                message: format!("database `{}` has no instance", database.name).into(),
                context: None,
            });
        }

        debug!(instance = %database.instance, database = %database.name, engine = %database.engine, "Database upserted");
        self.databases.write().insert(database.key(), database.clone());
        Ok(database)
    }

    /// # Errors
    /// Returns [`DatabaseError::Payload`] for a malformed payload, otherwise the errors of
    /// [`Self::upsert_database`].
    pub fn upsert_database_json(&self, payload: &Value) -> Result<Database> {
        self.upsert_database(Database::from_json(payload)?)
    }

    /// Applies the fields set in `patch`.
    ///
    /// # Errors
    /// Returns [`DatabaseError::NotFound`] if the database does not exist.
    pub fn patch_database(&self, instance: &str, name: &str, patch: DatabasePatch) -> Result<Database> {
        let mut databases = self.databases.write();
        let Some(database) = databases.get_mut(&(instance.to_owned(), name.to_owned())) else {
            return Err(DatabaseError::NotFound {
                instance: instance.to_owned(),
                name: name.to_owned(),
                context: None,
            });
        };

        if let Some(state) = patch.state {
            database.state = state;
        }
        if let Some(schema_version) = patch.schema_version {
            database.schema_version = schema_version;
        }

        debug!(instance, database = name, state = %database.state, "Database patched");
        Ok(database.clone())
    }

    #[must_use]
    pub fn get_database(&self, instance: &str, name: &str) -> Option<Database> {
        self.databases.read().get(&(instance.to_owned(), name.to_owned())).cloned()
    }

    /// Databases matching `find`, sorted by instance then name.
    #[must_use]
    pub fn find_databases(&self, find: &DatabaseFind) -> Vec<Database> {
        let mut found: Vec<_> = self
            .databases
            .read()
            .values()
            .filter(|d| match (&find.instance, &find.live_instances) {
                (Some(instance), _) => &d.instance == instance,
                (None, Some(live)) => live.contains(&d.instance),
                (None, None) => true,
            })
            .cloned()
            .collect();
        found.sort_unstable_by(|a, b| (&a.instance, &a.name).cmp(&(&b.instance, &b.name)));
        found
    }
}

/// Initialize the database slice.
///
/// # Errors
/// Infallible today; the signature matches the other slices.
pub fn init() -> Result<InitializedSlice> {
    tracing::info!("Database slice initialized");

    Ok(InitializedSlice::new(DatabaseStore::default()))
}
