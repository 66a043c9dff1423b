//! State actions: the behavior run when a state is entered by dispatch.

use super::engine::Engine;
use crate::core::{Event, EventData, State};

type ActionFn<S, E, C, D> = Box<dyn Fn(&mut C, &mut Engine<S, E>, Option<&D>) + Send + Sync>;

/// What a state does with the payload of the event that entered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataExpectation {
    /// The action receives `Option<&D>`.
    Optional,
    /// Entering without a payload is a misuse error.
    Required,
    /// The payload is dropped before the action runs.
    Ignored,
}

/// Callable bound to one state.
///
/// The action gets the machine's context object, the engine (for guard
/// queries and [`Engine::internal_event`]), and a borrow of the dispatched
/// payload in the shape chosen at registration. The payload itself stays with
/// the dispatch and is dropped when the action returns.
pub struct StateAction<S: State, E: Event, C, D: EventData> {
    expects: DataExpectation,
    run: ActionFn<S, E, C, D>,
}

impl<S: State, E: Event, C, D: EventData> StateAction<S, E, C, D> {
    /// Action receiving the payload if one was dispatched.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&mut C, &mut Engine<S, E>, Option<&D>) + Send + Sync + 'static,
    {
        Self {
            expects: DataExpectation::Optional,
            run: Box::new(action),
        }
    }

    /// Action that must be entered with a payload.
    pub fn with_data<F>(action: F) -> Self
    where
        F: Fn(&mut C, &mut Engine<S, E>, &D) + Send + Sync + 'static,
    {
        Self {
            expects: DataExpectation::Required,
            run: Box::new(move |context, engine, data| {
                if let Some(data) = data {
                    action(context, engine, data);
                }
            }),
        }
    }

    /// Action that ignores any payload.
    pub fn no_data<F>(action: F) -> Self
    where
        F: Fn(&mut C, &mut Engine<S, E>) + Send + Sync + 'static,
    {
        Self {
            expects: DataExpectation::Ignored,
            run: Box::new(move |context, engine, _| action(context, engine)),
        }
    }

    /// Action that does nothing.
    pub fn noop() -> Self {
        Self::no_data(|_, _| {})
    }

    pub fn expects(&self) -> DataExpectation {
        self.expects
    }

    pub fn requires_data(&self) -> bool {
        self.expects == DataExpectation::Required
    }

    /// Run the action, consuming the payload.
    ///
    /// States that ignore data see the payload released before they run;
    /// otherwise it is released once the action returns.
    pub(crate) fn invoke(&self, context: &mut C, engine: &mut Engine<S, E>, data: Option<D>) {
        if self.expects == DataExpectation::Ignored {
            drop(data);
            (self.run)(context, engine, None);
        } else {
            (self.run)(context, engine, data.as_ref());
        }
    }
}

impl<S: State, E: Event, C, D: EventData> std::fmt::Debug for StateAction<S, E, C, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateAction")
            .field("expects", &self.expects)
            .finish_non_exhaustive()
    }
}
