//! # Domain Models
//!
//! Wire vocabularies shared between the client and the remote service, the codec that
//! maps them to and from JSON, and the client configuration model.
//! Keep it lean: no I/O, networking, or heavy logic. Everything here is a process-wide
//! constant or a pure function.
//!
//! ```rust
//! use dbm_domain::codec::WireEnum;
//! use dbm_domain::vocab::Engine;
//!
//! assert_eq!(Engine::decode("MYSQL"), Engine::Mysql);
//! assert_eq!(Engine::encode_ordinal(7), "MONGODB");
//! assert_eq!(Engine::decode("NOT_A_REAL_ENGINE"), Engine::Unrecognized);
//! ```

// Lets `#[wire_enum]` expansions inside this crate resolve `::dbm_domain` paths.
extern crate self as dbm_domain;

pub mod codec;
pub mod config;
pub mod vocab;

pub use dbm_derive::wire_enum;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
