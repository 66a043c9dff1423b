//! Errors surfaced while dispatching events.

use thiserror::Error;

/// Programming errors in how a machine is driven.
///
/// These are never retried by the engine; the caller has to fix the call
/// site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MisuseError {
    /// A state action panicked during the dispatch of `event`. The machine
    /// accepts no further events.
    #[error("State action for event '{event}' panicked; the machine no longer accepts events")]
    Poisoned { event: String },

    #[error("Internal event to '{target}' issued outside a state action")]
    InternalEventOutsideAction { target: String },

    #[error("No transition table registered for event '{event}'")]
    UnknownEvent { event: String },

    #[error("State '{state}' requires event data but '{event}' was dispatched without any")]
    MissingEventData { event: String, state: String },

    #[error("State index {index} out of range (max states: {max})")]
    StateOutOfRange { index: usize, max: usize },
}

/// Errors returned from an external event dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The table marks the event as impossible in the current state.
    #[error("Event '{event}' cannot happen in state '{state}'")]
    IllegalTransition { event: String, state: String },

    #[error(transparent)]
    Misuse(#[from] MisuseError),
}

impl TransitionError {
    pub fn is_illegal_transition(&self) -> bool {
        matches!(self, Self::IllegalTransition { .. })
    }

    pub fn is_misuse(&self) -> bool {
        matches!(self, Self::Misuse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_transition_names_event_and_state() {
        let err = TransitionError::IllegalTransition {
            event: "Halt".to_string(),
            state: "Stop".to_string(),
        };
        assert_eq!(err.to_string(), "Event 'Halt' cannot happen in state 'Stop'");
        assert!(err.is_illegal_transition());
        assert!(!err.is_misuse());
    }

    #[test]
    fn misuse_converts_transparently() {
        let err: TransitionError = MisuseError::UnknownEvent {
            event: "Reset".to_string(),
        }
        .into();
        assert!(err.is_misuse());
        assert_eq!(err.to_string(), "No transition table registered for event 'Reset'");
    }

    #[test]
    fn poisoned_names_the_event_that_panicked() {
        let err = MisuseError::Poisoned {
            event: "Go".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "State action for event 'Go' panicked; the machine no longer accepts events"
        );
    }
}
