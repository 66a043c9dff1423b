//! Build errors for state machines and transition tables.

use thiserror::Error;

/// A single configuration defect found while building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("State set is empty; MAX_STATES must be positive")]
    NoStates,

    #[error("Transition table for '{event}' has {found} entries, expected {expected}")]
    TableLength {
        event: String,
        expected: usize,
        found: usize,
    },

    #[error("Transition table for '{event}' targets state index {target} from state index {from} (max states: {max})")]
    TargetOutOfRange {
        event: String,
        from: usize,
        target: usize,
        max: usize,
    },

    #[error("Transition table for '{event}' registered more than once")]
    DuplicateEvent { event: String },

    #[error("State map has {found} actions, expected {expected}")]
    ActionCount { expected: usize, found: usize },

    #[error("No action registered for state '{state}'")]
    MissingAction { state: String },

    #[error("Action for state '{state}' registered more than once")]
    DuplicateAction { state: String },

    #[error("Action registered for state index {index} (max states: {max})")]
    ActionOutOfRange { index: usize, max: usize },

    #[error("Initial state index {index} out of range (max states: {max})")]
    InitialOutOfRange { index: usize, max: usize },

    #[error("Transition table lists state '{state}' more than once")]
    DuplicateEntry { state: String },

    #[error("Transition table has no entry for state '{state}'")]
    MissingEntry { state: String },
}

/// Errors that can occur when building state machines and tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    /// Every defect found, not just the first.
    #[error("Invalid state machine configuration: {}", summarize(.0))]
    Invalid(Vec<ConfigError>),
}

fn summarize(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl BuildError {
    /// Configuration defects carried by this error.
    pub fn defects(&self) -> &[ConfigError] {
        match self {
            Self::MissingInitialState => &[],
            Self::Invalid(errors) => errors,
        }
    }
}
