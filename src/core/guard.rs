//! Guard evaluation derived from transition tables.
//!
//! A guard answers "would firing this event from that state be legal?"
//! without touching any machine. Only [`Transition::CannotHappen`] entries
//! are disallowed; ignored events are legal no-ops.

use super::state::State;
use super::table::{Transition, TransitionTable};

/// Pure predicate over one event's transition table.
///
/// # Example
///
/// ```rust
/// use statemap::core::{Transition, TransitionTable};
/// use statemap::state_enum;
///
/// state_enum! {
///     enum Light {
///         Off,
///         On,
///         Broken,
///     }
/// }
///
/// let toggle = TransitionTable::new([
///     Transition::To(Light::On),
///     Transition::To(Light::Off),
///     Transition::CannotHappen,
/// ]);
///
/// let guard = toggle.guard();
/// assert!(guard.check(Light::Off));
/// assert!(!guard.check(Light::Broken));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Guard<'t, S: State> {
    table: &'t TransitionTable<S>,
}

impl<'t, S: State> Guard<'t, S> {
    pub fn new(table: &'t TransitionTable<S>) -> Self {
        Guard { table }
    }

    /// Check if the table allows firing the event from this state.
    pub fn check(&self, state: S) -> bool {
        !matches!(self.table.lookup(state), Transition::CannotHappen)
    }

    /// All states from which the event may be fired.
    pub fn allowed_states(&self) -> Vec<S> {
        (0..S::MAX_STATES)
            .filter_map(S::from_index)
            .filter(|state| self.check(*state))
            .collect()
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
            Failed,
        }
    }

    fn table() -> TransitionTable<TestState> {
        TransitionTable::new([
            Transition::To(TestState::Processing),
            Transition::To(TestState::Complete),
            Transition::Ignored,
            Transition::CannotHappen,
        ])
    }

    #[test]
    fn guard_rejects_only_cannot_happen() {
        let table = table();
        let guard = table.guard();

        assert!(guard.check(TestState::Initial));
        assert!(guard.check(TestState::Processing));
        assert!(guard.check(TestState::Complete));
        assert!(!guard.check(TestState::Failed));
    }

    #[test]
    fn guard_is_deterministic() {
        let table = table();
        let guard = table.guard();

        let result1 = guard.check(TestState::Failed);
        let result2 = guard.check(TestState::Failed);

        assert_eq!(result1, result2);
    }

    #[test]
    fn allowed_states_lists_legal_sources() {
        let table = table();

        assert_eq!(
            table.guard().allowed_states(),
            vec![
                TestState::Initial,
                TestState::Processing,
                TestState::Complete
            ]
        );
    }
}
