//! Domain model for notes read from a backup database.
//!
//! # Responsibility
//! - Define typed records handed from storage to duplicate analysis.
//! - Keep comparison identity (`EquivalenceKey`) next to the record it derives from.
//!
//! # Invariants
//! - Records are read-only snapshots; nothing in core writes them back.

pub mod note;
