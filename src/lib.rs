//! Statemap: a table-driven state machine engine
//!
//! A machine is a flat set of states, one action per state, and one
//! transition table per external event kind. Each table entry says what
//! firing that event does in that state: move to a target state, do nothing,
//! or fail because the event cannot happen there.
//!
//! # Core Concepts
//!
//! - **State / Event**: fieldless enums implementing [`State`] and [`Event`]
//! - **TransitionTable**: per-event outcomes, one entry per state
//! - **Guard**: pure "is this event allowed right now?" query derived from a
//!   table
//! - **StateAction**: behavior run on entering a state, with a typed payload
//! - **Internal event**: a state action handing off to another state without
//!   a new external stimulus
//!
//! # Example
//!
//! ```rust
//! use statemap::builder::StateMachineBuilder;
//! use statemap::core::Transition::{CannotHappen, Ignored, To};
//! use statemap::dispatch::{StateAction, StateMachine};
//! use statemap::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Door {
//!         Closed,
//!         Open,
//!         Closing,
//!     }
//! }
//!
//! event_enum! {
//!     enum DoorEvent {
//!         Push,
//!         Close,
//!     }
//! }
//!
//! let mut door: StateMachine<Door, DoorEvent, u32> = StateMachineBuilder::new(0)
//!     .initial(Door::Closed)
//!     .action(Door::Closed, StateAction::noop())
//!     .action(Door::Open, StateAction::no_data(|opened: &mut u32, _| *opened += 1))
//!     .action(
//!         Door::Closing,
//!         StateAction::no_data(|_: &mut u32, engine| {
//!             engine.internal_event(Door::Closed).unwrap();
//!         }),
//!     )
//!     .event(DoorEvent::Push, [To(Door::Open), Ignored, CannotHappen])
//!     .event(DoorEvent::Close, [Ignored, To(Door::Closing), CannotHappen])
//!     .build()
//!     .unwrap();
//!
//! door.fire(DoorEvent::Push).unwrap();
//! assert_eq!(door.current_state(), Door::Open);
//!
//! let step = door.fire(DoorEvent::Close).unwrap();
//! assert_eq!(step.state(), Door::Closed);
//! assert_eq!(*door.context(), 1);
//! ```

pub mod builder;
pub mod core;
pub mod dispatch;

// Re-export commonly used types
pub use crate::builder::{BuildError, ConfigError, StateMachineBuilder, TransitionTableBuilder};
pub use crate::core::{Event, EventData, Guard, NoEventData, State, Transition, TransitionTable};
pub use crate::dispatch::{
    Engine, MisuseError, StateAction, StateMachine, StepResult, TransitionError,
};
