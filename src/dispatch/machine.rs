//! State machine that dispatches external events through transition tables.

use super::action::StateAction;
use super::engine::Engine;
use super::error::{MisuseError, TransitionError};
use crate::core::{Event, EventData, NoEventData, State, StateHistory, Transition};
use uuid::Uuid;

/// Result of a successful external event dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult<S: State> {
    /// The table moved the machine from `from` to `to` and ran `to`'s
    /// action. `current` is where the machine ended up, which differs from
    /// `to` when the action issued an internal event.
    Transitioned { from: S, to: S, current: S },

    /// The event is ignored in `state`; nothing ran.
    Ignored { state: S },
}

impl<S: State> StepResult<S> {
    /// State the machine is in after the dispatch.
    pub fn state(&self) -> S {
        match self {
            Self::Transitioned { current, .. } => *current,
            Self::Ignored { state } => *state,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }
}

/// A table-driven state machine owning its context object `C`.
///
/// Built with [`StateMachineBuilder`](crate::builder::StateMachineBuilder).
/// Dispatch is run-to-completion and single-threaded; callers that share a
/// machine between threads serialize access themselves.
///
/// All events of a machine share one payload type `D`. Whether a state needs
/// that payload is fixed by its [`StateAction`] and checked when the state is
/// entered ([`MisuseError::MissingEventData`]), not by the compiler. Typed
/// per-event wrappers on the owning type (`fn set_speed(&mut self, speed: i32)`)
/// are where callers get static payload checking.
pub struct StateMachine<S: State, E: Event, C, D: EventData = NoEventData> {
    context: C,
    engine: Engine<S, E>,
    /// One action per state, in state-index order.
    actions: Vec<StateAction<S, E, C, D>>,
}

impl<S: State, E: Event, C, D: EventData> StateMachine<S, E, C, D> {
    pub(crate) fn from_parts(
        context: C,
        engine: Engine<S, E>,
        actions: Vec<StateAction<S, E, C, D>>,
    ) -> Self {
        Self {
            context,
            engine,
            actions,
        }
    }

    /// Dispatch an external event, moving `data` into the entered state's
    /// action.
    ///
    /// The action only borrows the payload. It is dropped exactly once
    /// whichever way the dispatch goes: after the action returns, before it
    /// runs if the state ignores data, or without any action on the ignored
    /// and error paths.
    pub fn external_event(
        &mut self,
        event: E,
        data: Option<D>,
    ) -> Result<StepResult<S>, TransitionError> {
        // `&mut self` rules out a running action, so a raised flag means an
        // earlier action unwound.
        if let Some(panicked) = self.engine.dispatching_event() {
            tracing::warn!(
                machine = %self.engine.id(),
                machine_name = %self.engine.name(),
                event = event.name(),
                panicked = panicked.name(),
                "external event dispatched to a poisoned machine"
            );
            return Err(MisuseError::Poisoned {
                event: panicked.name().to_string(),
            }
            .into());
        }

        let from = self.engine.current_state();
        let Some(outcome) = self.engine.lookup(event) else {
            tracing::warn!(
                machine = %self.engine.id(),
                machine_name = %self.engine.name(),
                event = event.name(),
                "no transition table registered for event"
            );
            return Err(MisuseError::UnknownEvent {
                event: event.name().to_string(),
            }
            .into());
        };

        match outcome {
            Transition::CannotHappen => {
                tracing::error!(
                    machine = %self.engine.id(),
                    machine_name = %self.engine.name(),
                    event = event.name(),
                    state = from.name(),
                    "event cannot happen in current state"
                );
                Err(TransitionError::IllegalTransition {
                    event: event.name().to_string(),
                    state: from.name().to_string(),
                })
            }
            Transition::Ignored => {
                tracing::trace!(
                    machine = %self.engine.id(),
                    machine_name = %self.engine.name(),
                    event = event.name(),
                    state = from.name(),
                    "event ignored"
                );
                Ok(StepResult::Ignored { state: from })
            }
            Transition::To(target) => {
                let action =
                    self.actions
                        .get(target.index())
                        .ok_or(MisuseError::StateOutOfRange {
                            index: target.index(),
                            max: S::MAX_STATES,
                        })?;

                if action.requires_data() && data.is_none() {
                    tracing::warn!(
                        machine = %self.engine.id(),
                        machine_name = %self.engine.name(),
                        event = event.name(),
                        state = target.name(),
                        "state requires event data"
                    );
                    return Err(MisuseError::MissingEventData {
                        event: event.name().to_string(),
                        state: target.name().to_string(),
                    }
                    .into());
                }

                // The new state is current before its action runs so guard
                // queries from inside the action see it.
                self.engine.enter(target, event);
                self.engine.begin_action(event);
                action.invoke(&mut self.context, &mut self.engine, data);
                self.engine.end_action();

                Ok(StepResult::Transitioned {
                    from,
                    to: target,
                    current: self.engine.current_state(),
                })
            }
        }
    }

    /// Dispatch an external event that carries no payload.
    pub fn fire(&mut self, event: E) -> Result<StepResult<S>, TransitionError> {
        self.external_event(event, None)
    }

    /// Guard query for `event` in the current state.
    pub fn is_allowed(&self, event: E) -> bool {
        self.engine.is_allowed(event)
    }

    /// Internal transitions are only valid from inside a state action, which
    /// receives the [`Engine`] instead. Holding the machine means no action
    /// is running, so this always fails.
    pub fn internal_event(&mut self, target: S) -> Result<(), MisuseError> {
        tracing::warn!(
            machine = %self.engine.id(),
            machine_name = %self.engine.name(),
            to = target.name(),
            "internal event issued outside a state action"
        );
        Err(MisuseError::InternalEventOutsideAction {
            target: target.name().to_string(),
        })
    }

    /// Whether a state action panicked mid-dispatch. A poisoned machine
    /// rejects every external event with [`MisuseError::Poisoned`].
    pub fn is_poisoned(&self) -> bool {
        self.engine.is_dispatching()
    }

    pub fn current_state(&self) -> S {
        self.engine.current_state()
    }

    pub fn id(&self) -> Uuid {
        self.engine.id()
    }

    pub fn engine(&self) -> &Engine<S, E> {
        &self.engine
    }

    pub fn history(&self) -> &StateHistory<S, E> {
        self.engine.history()
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }
}

impl<S: State, E: Event, C: std::fmt::Debug, D: EventData> std::fmt::Debug
    for StateMachine<S, E, C, D>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("context", &self.context)
            .field("engine", &self.engine)
            .field("actions", &self.actions)
            .finish()
    }
}
