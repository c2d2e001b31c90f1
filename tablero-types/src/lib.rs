//! Core type definitions for Tablero.
//!
//! Identifier and timestamp newtypes shared by every subsystem:
//! - [`EntityId`] — UUID v7 record identifier, assigned by the storage layer
//! - [`Timestamp`] — epoch-milliseconds stamp maintained by the storage layer

mod ids;
mod timestamp;

pub use ids::EntityId;
pub use timestamp::Timestamp;
