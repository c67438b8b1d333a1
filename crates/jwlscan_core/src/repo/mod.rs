//! Record sources feeding duplicate analysis.
//!
//! # Responsibility
//! - Isolate SQL details of the backup schema from analysis code.
//!
//! # Invariants
//! - Sources validate required tables/columns before the first query.
//! - Sources only yield notes with a non-empty title or content.

pub mod note_source;
