//! State transition history tracking.
//!
//! Every state change made by a machine, external or internal, is recorded
//! here in order. The history is bounded: once `capacity` entries are held,
//! recording a new one evicts the oldest.

use super::event::Event;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions kept by a machine.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// How a state change came about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Table-driven transition caused by an external event.
    External,
    /// State overwrite issued from inside a running state action.
    Internal,
}

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use statemap::core::{StateTransition, TransitionKind};
/// use statemap::{event_enum, state_enum};
/// use chrono::Utc;
///
/// state_enum! {
///     enum Task {
///         Pending,
///         Running,
///     }
/// }
///
/// event_enum! {
///     enum TaskEvent {
///         Begin,
///     }
/// }
///
/// let transition = StateTransition {
///     from: Task::Pending,
///     to: Task::Running,
///     event: Some(TaskEvent::Begin),
///     kind: TransitionKind::External,
///     timestamp: Utc::now(),
/// };
/// assert!(transition.is_external());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, E: Event> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// External event that was being dispatched, if any
    pub event: Option<E>,
    pub kind: TransitionKind,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl<S: State, E: Event> StateTransition<S, E> {
    pub fn is_external(&self) -> bool {
        self.kind == TransitionKind::External
    }

    pub fn is_internal(&self) -> bool {
        self.kind == TransitionKind::Internal
    }
}

/// Ordered, bounded history of state transitions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, E: Event> {
    transitions: VecDeque<StateTransition<S, E>>,
    capacity: usize,
}

impl<S: State, E: Event> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<S: State, E: Event> StateHistory<S, E> {
    /// Create an empty history with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history keeping at most `capacity` transitions.
    ///
    /// A capacity of zero disables recording.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<S, E>) {
        if self.capacity == 0 {
            return;
        }
        while self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition, then the
    /// `to` state of each transition.
    pub fn get_path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the oldest and newest retained transition.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S, E>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<S, E>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
