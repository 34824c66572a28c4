//! Core use-case services.
//!
//! # Responsibility
//! - Own the authoritative task collection and its mutation commands.
//! - Bridge the collection to durable slot storage.
//! - Keep front ends decoupled from storage details.

pub mod clock;
pub mod confirm;
pub mod persistence;
pub mod task_store;
