//! Related-entity resolution.
//!
//! Records reference each other through id fields in their payloads. This
//! crate resolves those references back into full records, with the lookup
//! semantics views want: empty reference lists cost nothing, and dangling
//! single references resolve to nothing instead of failing.

mod resolver;

pub use resolver::RelationResolver;
