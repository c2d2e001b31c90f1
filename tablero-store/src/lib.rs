//! Polymorphic record store for Tablero.
//!
//! The semantic layer between the dashboard and an external storage
//! service. One physical table holds heterogeneous record types
//! distinguished by a discriminator field, with the payload stored as a
//! nested document per row — new record types need no schema change, at
//! the cost of weaker integrity guarantees and text-based ordering.
//!
//! # Architecture
//!
//! - [`StorageBackend`] — the contract expected from the external service
//!   (filtered selects, row mutation, change feeds)
//! - [`MemoryBackend`] — in-process reference backend for tests and
//!   offline use
//! - [`RecordStore`] / [`RecordSet`] — typed CRUD, search and ordering
//!   bound to one record type, returning flattened records
//! - [`Subscription`] / [`ChangeEvent`] — live change notifications
//!   re-shaped into the flattened view

mod backend;
mod collection;
mod config;
mod error;
mod memory;
mod subscription;

pub use backend::{ChangeFeed, ChangeKind, OrderBy, RawChange, SelectQuery, StorageBackend};
pub use collection::{DEFAULT_ORDER_FIELD, ListOptions, RecordSet, RecordStore, SEARCH_FIELD};
pub use config::{DEFAULT_TABLE, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryBackend;
pub use subscription::{ChangeEvent, Subscription};

/// Well-known record types used by the dashboard.
///
/// The store API stays string-typed; these are conveniences, not a closed
/// set.
pub mod kinds {
    pub const PROJECT: &str = "proyecto";
    pub const CLIENT: &str = "cliente";
    pub const MEMBER: &str = "miembro";
    pub const MESSAGE: &str = "mensaje";
}
