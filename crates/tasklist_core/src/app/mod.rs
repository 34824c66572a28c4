//! Application wiring: one-directional command flow.
//!
//! # Responsibility
//! - Route surface commands into the task store.
//! - Re-render after state changes and forward queued notices.
//!
//! # Invariants
//! - Flow per command: store mutation, persist, re-derive view, render.
//! - The view layer only ever reads the collection.

pub mod command;

use crate::repo::slot_repo::SlotStore;
use crate::service::task_store::{StoreEffect, TaskStore};
use crate::view::{Surface, ViewRenderer};
use command::Command;
use std::time::Instant;

/// A running task list session.
pub struct TaskApp<S: SlotStore, V: Surface> {
    store: TaskStore<S>,
    renderer: ViewRenderer<V>,
}

impl<S: SlotStore, V: Surface> TaskApp<S, V> {
    /// Performs the initial render and surfaces any load failure notice.
    pub fn start(store: TaskStore<S>, renderer: ViewRenderer<V>, now: Instant) -> Self {
        let mut app = Self { store, renderer };
        app.renderer.render(&app.store);
        app.flush_notices(now);
        app
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn renderer(&self) -> &ViewRenderer<V> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut ViewRenderer<V> {
        &mut self.renderer
    }

    /// Applies one command and re-renders when the store signals it.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> StoreEffect {
        let effect = match command {
            Command::Add(text) => self.store.add(&text),
            Command::Toggle(id) => self.store.toggle(id),
            Command::Delete(id) => self.store.delete(id),
            Command::ClearCompleted => self.store.clear_completed(),
            Command::SetFilter(filter) => self.store.set_filter(filter),
        };
        if effect.needs_render() {
            self.renderer.render(&self.store);
        }
        self.flush_notices(now);
        effect
    }

    /// Re-presents the current state without mutating it.
    pub fn refresh(&mut self) {
        self.renderer.render(&self.store);
    }

    /// Fires due notification timers.
    pub fn tick(&mut self, now: Instant) {
        self.renderer.fire_due(now);
    }

    fn flush_notices(&mut self, now: Instant) {
        let notices = self.store.drain_notices();
        self.renderer.notify_all(notices, now);
    }
}
