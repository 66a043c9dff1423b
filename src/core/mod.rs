//! Core state machine types and logic.
//!
//! This module contains the pure, data-only part of the engine:
//! - State and event definitions via the `State` and `Event` traits
//! - Transition tables and the guards derived from them
//! - Bounded history tracking
//!
//! Nothing here mutates a running machine; dispatch lives in
//! [`crate::dispatch`].

mod event;
mod guard;
mod history;
mod state;
mod table;

pub use event::{Event, EventData, NoEventData};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition, TransitionKind, DEFAULT_HISTORY_CAPACITY};
pub use state::State;
pub use table::{Transition, TransitionTable};
