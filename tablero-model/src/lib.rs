//! Record model for Tablero.
//!
//! Defines the types every subsystem stores and exchanges:
//! - [`RawRecord`] — a row of the polymorphic entity table (id, type
//!   discriminator, open JSON payload, timestamps)
//! - [`FlatRecord`] — the flattened external view: payload fields presented
//!   at the top level next to record metadata, with the original row
//!   retained
//!
//! Flattening is an explicit serialization step, not structural merging;
//! the boundary between stored shape and caller shape lives here.

mod flat;
mod record;

pub use flat::{FlatRecord, RESERVED_KEYS};
pub use record::RawRecord;
