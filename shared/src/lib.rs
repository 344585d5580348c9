//! Shared types and models for the R4C robot factory
//!
//! This crate contains the domain types, the reporting time window and input
//! validation. It performs no I/O; the backend wires it to storage, files and
//! mail.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
