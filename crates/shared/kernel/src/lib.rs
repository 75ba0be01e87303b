//! Kernel utilities shared across slices.
//! Keep this crate lightweight: the slice registry and layered config loading.
//!
//! ## Registry
//! ```rust
//! use dbm_kernel::registry::Registry;
//!
//! let registry = Registry::builder().build().unwrap();
//! assert_eq!(registry.len(), 0);
//! ```
pub mod config;
pub mod registry;

pub use dbm_domain as domain;
pub use registry::{Registry, RegistryError, RegistryErrorExt};
