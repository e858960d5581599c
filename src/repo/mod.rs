//! Data-access layer, one module per store.
//!
//! Entity invariants (unique pairs, self-subscription, link replacement
//! atomicity) are enforced here, in front of the schema's unique constraints.

pub mod catalog;
pub mod engagement;
pub mod identity;
pub mod recipes;
