//! Task list domain model.
//!
//! # Responsibility
//! - Define the canonical task record, filter selector and derived counters.
//! - Define user-facing notice payloads shared by store and view layers.
//!
//! # Invariants
//! - Every task is identified by a stable, positive `TaskId`.
//! - Only `completed` changes after a task is created.

pub mod notice;
pub mod task;
