//! Core task list logic: store, persistence adapter and view renderer.
//! This crate is the single source of truth for task invariants.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use app::command::{split_verb, Command, CommandParseError};
pub use app::TaskApp;
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::notice::{Notice, NoticeKind};
pub use model::task::{Counts, Filter, Task, TaskId, TaskValidationError};
pub use repo::slot_repo::{MemorySlotStore, RepoError, RepoResult, SlotStore, SqliteSlotStore};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::confirm::{AutoConfirm, Confirm};
pub use service::persistence::{LoadOutcome, PersistError, TaskPersistence, STORAGE_KEY};
pub use service::task_store::{StoreEffect, TaskStore};
pub use view::html::{escape_html, HtmlSurface};
pub use view::notify::{Notification, NotificationId, NotificationPhase};
pub use view::{filtered_view, Frame, RowView, Surface, ViewRenderer};
