//! Transition tables: per-event outcome for every state.
//!
//! A table holds one [`Transition`] per state, in state-index order. Entry
//! `i` describes what happens when the table's event fires while the machine
//! is in state `i`.

use super::guard::Guard;
use super::state::State;
use serde::{Deserialize, Serialize};

/// Outcome of firing an event in one particular state.
///
/// Serialized in snake case, so a JSON table reads
/// `[{"to": "Start"}, "cannot_happen", "ignored"]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", bound = "")]
pub enum Transition<S: State> {
    /// Move to the given state and run its action.
    To(S),

    /// Firing the event here is a logic defect.
    CannotHappen,

    /// Legal, but nothing happens: no state change, no action.
    Ignored,
}

impl<S: State> Transition<S> {
    /// Target state, if this entry is a real transition.
    pub fn target(&self) -> Option<S> {
        match self {
            Self::To(state) => Some(*state),
            Self::CannotHappen | Self::Ignored => None,
        }
    }

    pub fn is_cannot_happen(&self) -> bool {
        matches!(self, Self::CannotHappen)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// Transition table for a single event kind.
///
/// Tables are plain data and are not validated on their own; the
/// [`StateMachineBuilder`](crate::builder::StateMachineBuilder) checks their
/// length and targets when the machine is built.
///
/// # Example
///
/// ```rust
/// use statemap::core::{State, Transition, TransitionTable};
/// use statemap::state_enum;
///
/// state_enum! {
///     enum Motor {
///         Idle,
///         Stop,
///         Start,
///         ChangeSpeed,
///     }
/// }
///
/// let halt = TransitionTable::new([
///     Transition::Ignored,              // Idle
///     Transition::CannotHappen,         // Stop
///     Transition::To(Motor::Stop),      // Start
///     Transition::To(Motor::Stop),      // ChangeSpeed
/// ]);
///
/// assert_eq!(halt.lookup(Motor::Start), Transition::To(Motor::Stop));
/// assert!(halt.is_allowed(Motor::Idle));
/// assert!(!halt.is_allowed(Motor::Stop));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct TransitionTable<S: State> {
    entries: Vec<Transition<S>>,
}

impl<S: State> TransitionTable<S> {
    /// Create a table from entries listed in state-index order.
    pub fn new(entries: impl Into<Vec<Transition<S>>>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Parse a table from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Outcome of firing this event while in `state`.
    ///
    /// A state with no entry reads as [`Transition::CannotHappen`]; built
    /// machines never hold such tables.
    pub fn lookup(&self, state: S) -> Transition<S> {
        self.entries
            .get(state.index())
            .copied()
            .unwrap_or(Transition::CannotHappen)
    }

    /// Whether firing this event from `state` is legal.
    pub fn is_allowed(&self, state: S) -> bool {
        self.guard().check(state)
    }

    /// Guard evaluator over this table.
    pub fn guard(&self) -> Guard<'_, S> {
        Guard::new(self)
    }

    pub fn entries(&self) -> &[Transition<S>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: State> From<Vec<Transition<S>>> for TransitionTable<S> {
    fn from(entries: Vec<Transition<S>>) -> Self {
        Self::new(entries)
    }
}

impl<S: State, const N: usize> From<[Transition<S>; N]> for TransitionTable<S> {
    fn from(entries: [Transition<S>; N]) -> Self {
        Self::new(entries)
    }
}
