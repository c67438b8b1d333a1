//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record sources and analysis into use-case level APIs.
//! - Keep CLI wiring decoupled from storage details.

pub mod duplicate_service;
