//! Builder for constructing state machines.

use crate::builder::error::{BuildError, ConfigError};
use crate::core::{Event, EventData, NoEventData, State, TransitionTable, DEFAULT_HISTORY_CAPACITY};
use crate::dispatch::{Engine, StateAction, StateMachine};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

const DEFAULT_NAME: &str = "state-machine";

/// Builder for constructing state machines with a fluent API.
///
/// Every state needs exactly one action and every event exactly one table of
/// `S::MAX_STATES` entries. All defects are collected and reported together
/// by [`build`](Self::build).
pub struct StateMachineBuilder<S: State, E: Event, C, D: EventData = NoEventData> {
    context: C,
    initial: Option<S>,
    name: Option<String>,
    history_capacity: usize,
    actions: Vec<(usize, StateAction<S, E, C, D>)>,
    state_map_len: Option<usize>,
    tables: Vec<(E, TransitionTable<S>)>,
}

impl<S: State, E: Event, C, D: EventData> StateMachineBuilder<S, E, C, D> {
    /// Create a new builder around the machine's context object.
    pub fn new(context: C) -> Self {
        Self {
            context,
            initial: None,
            name: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            actions: Vec::new(),
            state_map_len: None,
            tables: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Name used in log fields.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of transitions kept in the history; zero disables it.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Register the action for one state.
    pub fn action(mut self, state: S, action: StateAction<S, E, C, D>) -> Self {
        self.actions.push((state.index(), action));
        self
    }

    /// Register every action at once, in state-index order.
    pub fn state_map(mut self, actions: Vec<StateAction<S, E, C, D>>) -> Self {
        self.state_map_len = Some(actions.len());
        self.actions.extend(actions.into_iter().enumerate());
        self
    }

    /// Register the transition table for one event kind.
    pub fn event(mut self, event: E, table: impl Into<TransitionTable<S>>) -> Self {
        self.tables.push((event, table.into()));
        self
    }

    fn validate(&self, initial: S) -> Validation<(), NonEmptyVec<ConfigError>> {
        let max = S::MAX_STATES;
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        if max == 0 {
            checks.push(Validation::fail(ConfigError::NoStates));
        }

        if initial.index() >= max {
            checks.push(Validation::fail(ConfigError::InitialOutOfRange {
                index: initial.index(),
                max,
            }));
        }

        if let Some(found) = self.state_map_len {
            if found != max {
                checks.push(Validation::fail(ConfigError::ActionCount {
                    expected: max,
                    found,
                }));
            }
        }

        for index in 0..max {
            let state = state_label::<S>(index);
            let count = self.actions.iter().filter(|(i, _)| *i == index).count();
            match count {
                0 => checks.push(Validation::fail(ConfigError::MissingAction { state })),
                1 => {}
                _ => checks.push(Validation::fail(ConfigError::DuplicateAction { state })),
            }
        }

        for (index, _) in self.actions.iter().filter(|(i, _)| *i >= max) {
            checks.push(Validation::fail(ConfigError::ActionOutOfRange {
                index: *index,
                max,
            }));
        }

        for (position, (event, table)) in self.tables.iter().enumerate() {
            if self.tables[..position].iter().any(|(e, _)| e == event) {
                checks.push(Validation::fail(ConfigError::DuplicateEvent {
                    event: event.name().to_string(),
                }));
            }

            if table.len() != max {
                checks.push(Validation::fail(ConfigError::TableLength {
                    event: event.name().to_string(),
                    expected: max,
                    found: table.len(),
                }));
            }

            for (from, outcome) in table.entries().iter().enumerate() {
                if let Some(target) = outcome.target() {
                    if target.index() >= max {
                        checks.push(Validation::fail(ConfigError::TargetOutOfRange {
                            event: event.name().to_string(),
                            from,
                            target: target.index(),
                            max,
                        }));
                    }
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the state machine.
    /// Returns an error if the initial state is missing or the state map and
    /// tables disagree with `S::MAX_STATES`.
    pub fn build(self) -> Result<StateMachine<S, E, C, D>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if let Validation::Failure(errors) = self.validate(initial) {
            let defects: Vec<ConfigError> = errors.iter().cloned().collect();
            tracing::warn!(
                defects = defects.len(),
                "rejected state machine configuration"
            );
            return Err(BuildError::Invalid(defects));
        }

        let mut actions = self.actions;
        actions.sort_by_key(|(index, _)| *index);
        let actions: Vec<StateAction<S, E, C, D>> =
            actions.into_iter().map(|(_, action)| action).collect();

        let tables: HashMap<E, TransitionTable<S>> = self.tables.into_iter().collect();
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        let engine = Engine::new(name, initial, tables, self.history_capacity);

        tracing::info!(
            machine = %engine.id(),
            machine_name = %engine.name(),
            states = S::MAX_STATES,
            events = engine.events().count(),
            initial = initial.name(),
            "state machine built"
        );

        Ok(StateMachine::from_parts(self.context, engine, actions))
    }
}

fn state_label<S: State>(index: usize) -> String {
    S::from_index(index)
        .map(|state| state.name().to_string())
        .unwrap_or_else(|| format!("#{index}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transition;

    crate::state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    crate::event_enum! {
        enum TestEvent {
            Advance,
            Reset,
        }
    }

    /// Hand-written state set whose `MAX_STATES` undercounts its variants.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
    enum Lopsided {
        Low,
        High,
    }

    impl State for Lopsided {
        const MAX_STATES: usize = 1;

        fn index(self) -> usize {
            self as usize
        }

        fn from_index(index: usize) -> Option<Self> {
            match index {
                0 => Some(Self::Low),
                1 => Some(Self::High),
                _ => None,
            }
        }

        fn name(&self) -> &str {
            match self {
                Self::Low => "Low",
                Self::High => "High",
            }
        }
    }

    /// Hand-written state type that declares no states at all.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
    struct Hollow;

    impl State for Hollow {
        const MAX_STATES: usize = 0;

        fn index(self) -> usize {
            0
        }

        fn from_index(_: usize) -> Option<Self> {
            None
        }

        fn name(&self) -> &str {
            "Hollow"
        }
    }

    type Builder = StateMachineBuilder<TestState, TestEvent, ()>;

    fn advance() -> [Transition<TestState>; 3] {
        [
            Transition::To(TestState::Processing),
            Transition::To(TestState::Complete),
            Transition::Ignored,
        ]
    }

    fn complete(builder: Builder) -> Builder {
        builder
            .action(TestState::Initial, StateAction::noop())
            .action(TestState::Processing, StateAction::noop())
            .action(TestState::Complete, StateAction::noop())
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = complete(Builder::new(()))
            .event(TestEvent::Advance, advance())
            .build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = complete(Builder::new(()))
            .initial(TestState::Initial)
            .name("pipeline")
            .history_capacity(4)
            .event(TestEvent::Advance, advance())
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), TestState::Initial);
        assert_eq!(machine.engine().name(), "pipeline");
        assert_eq!(machine.history().capacity(), 4);
        assert!(machine.is_allowed(TestEvent::Advance));
        assert!(!machine.is_allowed(TestEvent::Reset));
    }

    #[test]
    fn default_name_is_used_when_unset() {
        let machine = complete(Builder::new(()))
            .initial(TestState::Initial)
            .build()
            .unwrap();

        assert_eq!(machine.engine().name(), DEFAULT_NAME);
    }

    #[test]
    fn state_map_registers_in_index_order() {
        let mut machine: StateMachine<TestState, TestEvent, Vec<TestState>> =
            StateMachineBuilder::new(Vec::new())
                .initial(TestState::Initial)
                .state_map(vec![
                    StateAction::no_data(|seen: &mut Vec<TestState>, _| {
                        seen.push(TestState::Initial)
                    }),
                    StateAction::no_data(|seen: &mut Vec<TestState>, _| {
                        seen.push(TestState::Processing)
                    }),
                    StateAction::no_data(|seen: &mut Vec<TestState>, _| {
                        seen.push(TestState::Complete)
                    }),
                ])
                .event(TestEvent::Advance, advance())
                .build()
                .unwrap();

        machine.fire(TestEvent::Advance).unwrap();
        machine.fire(TestEvent::Advance).unwrap();

        assert_eq!(
            machine.context(),
            &vec![TestState::Processing, TestState::Complete]
        );
    }

    #[test]
    fn state_map_length_must_match() {
        let result = Builder::new(())
            .initial(TestState::Initial)
            .state_map(vec![StateAction::noop(), StateAction::noop()])
            .build();

        let err = result.unwrap_err();
        assert_eq!(
            err.defects(),
            &[
                ConfigError::ActionCount {
                    expected: 3,
                    found: 2
                },
                ConfigError::MissingAction {
                    state: "Complete".to_string()
                },
            ]
        );
    }

    #[test]
    fn duplicate_action_is_rejected() {
        let result = complete(Builder::new(()))
            .initial(TestState::Initial)
            .action(TestState::Processing, StateAction::noop())
            .build();

        assert_eq!(
            result.unwrap_err().defects(),
            &[ConfigError::DuplicateAction {
                state: "Processing".to_string()
            }]
        );
    }

    #[test]
    fn table_defects_are_accumulated() {
        let result = complete(Builder::new(()))
            .initial(TestState::Initial)
            .event(TestEvent::Advance, advance())
            .event(TestEvent::Advance, advance())
            .event(
                TestEvent::Reset,
                [Transition::To(TestState::Initial), Transition::Ignored],
            )
            .build();

        assert_eq!(
            result.unwrap_err().defects(),
            &[
                ConfigError::DuplicateEvent {
                    event: "Advance".to_string()
                },
                ConfigError::TableLength {
                    event: "Reset".to_string(),
                    expected: 3,
                    found: 2
                },
            ]
        );
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let result = StateMachineBuilder::<Lopsided, TestEvent, ()>::new(())
            .initial(Lopsided::High)
            .action(Lopsided::Low, StateAction::noop())
            .action(Lopsided::High, StateAction::noop())
            .event(TestEvent::Advance, [Transition::To(Lopsided::High)])
            .build();

        assert_eq!(
            result.unwrap_err().defects(),
            &[
                ConfigError::InitialOutOfRange { index: 1, max: 1 },
                ConfigError::ActionOutOfRange { index: 1, max: 1 },
                ConfigError::TargetOutOfRange {
                    event: "Advance".to_string(),
                    from: 0,
                    target: 1,
                    max: 1
                },
            ]
        );
    }

    #[test]
    fn empty_state_set_is_rejected() {
        let result = StateMachineBuilder::<Hollow, TestEvent, ()>::new(())
            .initial(Hollow)
            .build();

        assert_eq!(
            result.unwrap_err().defects(),
            &[
                ConfigError::NoStates,
                ConfigError::InitialOutOfRange { index: 0, max: 0 },
            ]
        );
    }

    #[test]
    fn build_error_message_lists_defects() {
        let err = BuildError::Invalid(vec![
            ConfigError::NoStates,
            ConfigError::MissingEntry {
                state: "Idle".to_string(),
            },
        ]);

        assert_eq!(
            err.to_string(),
            "Invalid state machine configuration: State set is empty; MAX_STATES must be positive; \
             Transition table has no entry for state 'Idle'"
        );
    }
}
