//! Query export store slice.
//!
//! Export requests are queued in arrival order until something downstream claims them with
//! [`ExportStore::take_export`] or [`ExportStore::drain_exports`].
mod error;

pub use crate::error::{ExportError, ExportErrorExt};
use crate::error::Result;
use dbm_domain::codec::expect_object;
use dbm_domain::vocab::ExportFormat;
use dbm_kernel::registry::InitializedSlice;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A request to export the result of a statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportRequest {
    /// Database the statement runs against.
    pub database: String,
    pub statement: String,
    pub format: ExportFormat,
    /// Row limit; `0` means unlimited.
    pub limit: u32,
}

impl ExportRequest {
    /// # Errors
    /// Returns [`ExportError::Payload`] if the payload is not a request object.
    pub fn from_json(payload: &Value) -> Result<Self> {
        expect_object(payload, "an export request object").context("Decoding export request")?;
        Self::deserialize(payload).context("Decoding export request")
    }

    /// # Errors
    /// Returns [`ExportError::Payload`] if serialization fails.
    pub fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self).context("Encoding export request")
    }
}

/// A request accepted into the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueuedExport {
    pub id: u64,
    #[serde(flatten)]
    pub request: ExportRequest,
}

#[derive(Debug, Default)]
struct Queue {
    next_id: u64,
    pending: Vec<QueuedExport>,
}

/// Export slice inner state.
#[dbm_derive::dbm_slice(
    name = "export",
    entities(ExportRequest, QueuedExport),
    actions(queue_export, queue_export_json, take_export, drain_exports),
    selectors(pending_exports, export_file_extension)
)]
pub struct ExportStore {
    queue: RwLock<Queue>,
}

impl Default for ExportStore {
    fn default() -> Self {
        Self::new(ExportStoreInner { queue: RwLock::default() })
    }
}

impl ExportStore {
    /// Queues a request and returns it with its assigned id.
    ///
    /// # Errors
    /// Returns [`ExportError::Invalid`] if the database or statement is empty, or if the
    /// format has no file extension (unspecified or unrecognized).
    pub fn queue_export(&self, request: ExportRequest) -> Result<QueuedExport> {
        if request.database.trim().is_empty() || request.statement.trim().is_empty() {
            return Err(ExportError::Invalid {
                message: "database and statement are required".into(),
                context: None,
            });
        }
        if Self::export_file_extension(request.format).is_none() {
            return Err(ExportError::Invalid {
                message: format!("unsupported format `{}`", request.format).into(),
                context: None,
            });
        }

        let mut queue = self.queue.write();
        queue.next_id += 1;
        let queued = QueuedExport { id: queue.next_id, request };
        queue.pending.push(queued.clone());

        debug!(id = queued.id, database = %queued.request.database, format = %queued.request.format, "Export queued");
        Ok(queued)
    }

    /// # Errors
    /// Returns [`ExportError::Payload`] for a malformed payload, otherwise the errors of
    /// [`Self::queue_export`].
    pub fn queue_export_json(&self, payload: &Value) -> Result<QueuedExport> {
        self.queue_export(ExportRequest::from_json(payload)?)
    }

    /// Claims one queued request, removing it from the queue.
    pub fn take_export(&self, id: u64) -> Option<QueuedExport> {
        let mut queue = self.queue.write();
        let index = queue.pending.iter().position(|q| q.id == id)?;
        let taken = queue.pending.remove(index);

        debug!(id, remaining = queue.pending.len(), "Export taken");
        Some(taken)
    }

    /// Claims every queued request in arrival order, leaving the queue empty.
    pub fn drain_exports(&self) -> Vec<QueuedExport> {
        let drained = std::mem::take(&mut self.queue.write().pending);
        if !drained.is_empty() {
            debug!(count = drained.len(), "Exports drained");
        }
        drained
    }

    /// Queued requests in arrival order.
    #[must_use]
    pub fn pending_exports(&self) -> Vec<QueuedExport> {
        self.queue.read().pending.clone()
    }

    /// File extension for an export format, without the dot.
    #[must_use]
    pub const fn export_file_extension(format: ExportFormat) -> Option<&'static str> {
        match format {
            ExportFormat::Csv => Some("csv"),
            ExportFormat::Json => Some("json"),
            ExportFormat::Sql => Some("sql"),
            ExportFormat::Xlsx => Some("xlsx"),
            ExportFormat::Unspecified | ExportFormat::Unrecognized => None,
        }
    }
}

/// Initialize the export slice.
///
/// # Errors
/// Infallible today; the signature matches the other slices.
pub fn init() -> Result<InitializedSlice> {
    tracing::info!("Export slice initialized");

    Ok(InitializedSlice::new(ExportStore::default()))
}
