//! Keyed construction of transition tables.

use crate::builder::error::{BuildError, ConfigError};
use crate::core::{State, Transition, TransitionTable};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder declaring a table one state at a time, in any order.
///
/// Unlike a positional array, this form can say which state is missing or
/// listed twice.
///
/// # Example
///
/// ```rust
/// use statemap::builder::TransitionTableBuilder;
/// use statemap::core::Transition;
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
/// let set_speed = TransitionTableBuilder::new()
///     .to(Motor::Idle, Motor::Start)
///     .cannot_happen(Motor::Stop)
///     .to(Motor::Start, Motor::ChangeSpeed)
///     .to(Motor::ChangeSpeed, Motor::ChangeSpeed)
///     .build()
///     .unwrap();
///
/// assert_eq!(set_speed.lookup(Motor::Start), Transition::To(Motor::ChangeSpeed));
/// ```
pub struct TransitionTableBuilder<S: State> {
    entries: Vec<(S, Transition<S>)>,
    otherwise: Option<Transition<S>>,
}

impl<S: State> TransitionTableBuilder<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            otherwise: None,
        }
    }

    /// Set the outcome for `state`.
    pub fn entry(mut self, state: S, outcome: Transition<S>) -> Self {
        self.entries.push((state, outcome));
        self
    }

    /// Firing the event in `state` moves to `target`.
    pub fn to(self, state: S, target: S) -> Self {
        self.entry(state, Transition::To(target))
    }

    pub fn ignore(self, state: S) -> Self {
        self.entry(state, Transition::Ignored)
    }

    pub fn cannot_happen(self, state: S) -> Self {
        self.entry(state, Transition::CannotHappen)
    }

    /// Outcome for every state without an explicit entry.
    ///
    /// Without it, a missing state is a build error.
    pub fn otherwise(mut self, outcome: Transition<S>) -> Self {
        self.otherwise = Some(outcome);
        self
    }

    fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        for index in 0..S::MAX_STATES {
            let Some(state) = S::from_index(index) else {
                continue;
            };
            let count = self.entries.iter().filter(|(s, _)| *s == state).count();
            let check = match count {
                0 if self.otherwise.is_none() => Validation::fail(ConfigError::MissingEntry {
                    state: state.name().to_string(),
                }),
                0 | 1 => Validation::success(()),
                _ => Validation::fail(ConfigError::DuplicateEntry {
                    state: state.name().to_string(),
                }),
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the table in state-index order.
    pub fn build(self) -> Result<TransitionTable<S>, BuildError> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(BuildError::Invalid(errors.iter().cloned().collect()));
        }

        let fallback = self.otherwise.unwrap_or(Transition::CannotHappen);
        let entries: Vec<Transition<S>> = (0..S::MAX_STATES)
            .filter_map(S::from_index)
            .map(|state| {
                self.entries
                    .iter()
                    .find(|(s, _)| *s == state)
                    .map(|(_, outcome)| *outcome)
                    .unwrap_or(fallback)
            })
            .collect();

        Ok(TransitionTable::new(entries))
    }
}

impl<S: State> Default for TransitionTableBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn entries_land_in_state_index_order() {
        let table = TransitionTableBuilder::new()
            .ignore(TestState::Complete)
            .to(TestState::Initial, TestState::Processing)
            .cannot_happen(TestState::Processing)
            .build()
            .unwrap();

        assert_eq!(
            table.entries(),
            &[
                Transition::To(TestState::Processing),
                Transition::CannotHappen,
                Transition::Ignored,
            ]
        );
    }

    #[test]
    fn missing_and_duplicate_entries_are_all_reported() {
        let result = TransitionTableBuilder::new()
            .to(TestState::Initial, TestState::Processing)
            .ignore(TestState::Initial)
            .build();

        let err = result.unwrap_err();
        assert_eq!(
            err.defects(),
            &[
                ConfigError::DuplicateEntry {
                    state: "Initial".to_string()
                },
                ConfigError::MissingEntry {
                    state: "Processing".to_string()
                },
                ConfigError::MissingEntry {
                    state: "Complete".to_string()
                },
            ]
        );
    }

    #[test]
    fn otherwise_fills_gaps() {
        let table = TransitionTableBuilder::new()
            .to(TestState::Processing, TestState::Complete)
            .otherwise(Transition::Ignored)
            .build()
            .unwrap();

        assert_eq!(table.lookup(TestState::Initial), Transition::Ignored);
        assert_eq!(
            table.lookup(TestState::Processing),
            Transition::To(TestState::Complete)
        );
        assert_eq!(table.lookup(TestState::Complete), Transition::Ignored);
    }
}
