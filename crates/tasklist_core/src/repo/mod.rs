//! Durable key-value slot abstractions and implementations.
//!
//! # Responsibility
//! - Define the storage contract the persistence adapter writes through.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - A slot holds one opaque UTF-8 value per key; writes replace it whole.

pub mod slot_repo;
