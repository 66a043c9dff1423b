//! The engine half of a state machine: current state, tables, history.
//!
//! State actions receive `&mut Engine` while they run. That is the only
//! place an internal transition can be issued from; the current state is
//! otherwise mutated solely by [`StateMachine::external_event`].
//!
//! [`StateMachine::external_event`]: super::StateMachine::external_event

use super::error::MisuseError;
use crate::core::{
    Event, State, StateHistory, StateTransition, Transition, TransitionKind, TransitionTable,
};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

pub struct Engine<S: State, E: Event> {
    id: Uuid,
    name: String,
    current: S,
    tables: HashMap<E, TransitionTable<S>>,
    /// Event whose state action is currently running, `None` when idle.
    /// Left set when that action unwinds.
    dispatching: Option<E>,
    history: StateHistory<S, E>,
}

impl<S: State, E: Event> Engine<S, E> {
    pub(crate) fn new(
        name: String,
        initial: S,
        tables: HashMap<E, TransitionTable<S>>,
        history_capacity: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            current: initial,
            tables,
            dispatching: None,
            history: StateHistory::with_capacity(history_capacity),
        }
    }

    /// Unique id of this machine instance, used in log fields.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_state(&self) -> S {
        self.current
    }

    /// Whether a state action is running right now, or panicked and never
    /// finished.
    pub fn is_dispatching(&self) -> bool {
        self.dispatching.is_some()
    }

    /// Event currently being dispatched, if a state action is running.
    pub fn dispatching_event(&self) -> Option<E> {
        self.dispatching
    }

    /// Table entry for `event` in the current state.
    ///
    /// Returns `None` when no table is registered for `event`.
    pub fn lookup(&self, event: E) -> Option<Transition<S>> {
        self.tables
            .get(&event)
            .map(|table| table.lookup(self.current))
    }

    /// Guard query: may `event` be fired from the current state?
    ///
    /// Pure; callable from inside a state action, where it reflects the
    /// state just entered. Unregistered events are never allowed.
    pub fn is_allowed(&self, event: E) -> bool {
        self.tables
            .get(&event)
            .is_some_and(|table| table.guard().check(self.current))
    }

    pub fn table(&self, event: E) -> Option<&TransitionTable<S>> {
        self.tables.get(&event)
    }

    /// Registered event kinds, in no particular order.
    pub fn events(&self) -> impl Iterator<Item = E> + '_ {
        self.tables.keys().copied()
    }

    pub fn history(&self) -> &StateHistory<S, E> {
        &self.history
    }

    /// Overwrite the current state from inside a running state action.
    ///
    /// No action runs for `target`; the dispatch that is in progress simply
    /// ends in `target`. Fails when no state action is running.
    pub fn internal_event(&mut self, target: S) -> Result<(), MisuseError> {
        let Some(event) = self.dispatching else {
            tracing::warn!(
                machine = %self.id,
                machine_name = %self.name,
                to = target.name(),
                "internal event issued outside a state action"
            );
            return Err(MisuseError::InternalEventOutsideAction {
                target: target.name().to_string(),
            });
        };

        if target.index() >= S::MAX_STATES {
            return Err(MisuseError::StateOutOfRange {
                index: target.index(),
                max: S::MAX_STATES,
            });
        }

        let from = self.current;
        self.current = target;
        self.history.record(StateTransition {
            from,
            to: target,
            event: Some(event),
            kind: TransitionKind::Internal,
            timestamp: Utc::now(),
        });

        tracing::debug!(
            machine = %self.id,
            machine_name = %self.name,
            event = event.name(),
            from = from.name(),
            to = target.name(),
            "internal transition"
        );
        Ok(())
    }

    /// Move to `target` on behalf of an external event.
    pub(crate) fn enter(&mut self, target: S, event: E) {
        let from = self.current;
        self.current = target;
        self.history.record(StateTransition {
            from,
            to: target,
            event: Some(event),
            kind: TransitionKind::External,
            timestamp: Utc::now(),
        });

        tracing::debug!(
            machine = %self.id,
            machine_name = %self.name,
            event = event.name(),
            from = from.name(),
            to = target.name(),
            "external transition"
        );
    }

    pub(crate) fn begin_action(&mut self, event: E) {
        self.dispatching = Some(event);
    }

    pub(crate) fn end_action(&mut self) {
        self.dispatching = None;
    }
}

impl<S: State, E: Event> std::fmt::Debug for Engine<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("current", &self.current)
            .field("dispatching", &self.dispatching)
            .field("events", &self.tables.len())
            .finish()
    }
}
