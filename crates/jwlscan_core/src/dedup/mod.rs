//! Duplicate-note detection.
//!
//! # Responsibility
//! - Canonicalize note text fields before comparison (`normalize`).
//! - Group notes by equivalence key and summarize duplicate groups (`grouper`).
//!
//! # Invariants
//! - Detection is read-only; no record is modified or merged.
//! - Only exact key equality groups notes together.

pub mod grouper;
pub mod normalize;
