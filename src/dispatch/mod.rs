//! Event dispatch around the pure core.
//!
//! # Key Concepts
//!
//! - **StateMachine**: owns the context object, the engine and the state
//!   map; runs external events to completion
//! - **Engine**: current state, tables and history; handed to state actions
//!   so they can query guards and issue internal transitions
//! - **StateAction**: behavior bound to one state, with a fixed payload
//!   expectation

mod action;
mod engine;
mod error;
mod machine;

pub use action::{DataExpectation, StateAction};
pub use engine::Engine;
pub use error::{MisuseError, TransitionError};
pub use machine::{StateMachine, StepResult};
