//! Builder API for state machine construction.
//!
//! This module provides fluent builders and macros for declaring state
//! sets, transition tables and state maps, validated when the machine is
//! built.

pub mod error;
pub mod machine;
pub mod macros;
pub mod table;

pub use error::{BuildError, ConfigError};
pub use machine::StateMachineBuilder;
pub use table::TransitionTableBuilder;
