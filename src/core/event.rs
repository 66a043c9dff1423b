//! External event kinds and their payloads.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// An external event kind.
///
/// Each kind owns exactly one transition table. Implement it by hand or with
/// [`event_enum!`](crate::event_enum).
pub trait Event:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}

/// Marker for event payloads.
///
/// Payloads are moved into a dispatch and dropped by the engine once the
/// entered state's action has returned, so `Drop` impls run exactly once per
/// dispatch.
pub trait EventData: Send + 'static {}

/// Payload for machines whose events carry no data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoEventData;

impl EventData for NoEventData {}

impl EventData for () {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Button {
        Press,
        Release,
    }

    impl Event for Button {
        fn name(&self) -> &str {
            match self {
                Self::Press => "Press",
                Self::Release => "Release",
            }
        }
    }

    fn assert_event_data<D: EventData>() {}

    #[test]
    fn event_name_returns_correct_value() {
        assert_eq!(Button::Press.name(), "Press");
        assert_eq!(Button::Release.name(), "Release");
    }

    #[test]
    fn unit_payloads_are_event_data() {
        assert_event_data::<NoEventData>();
        assert_event_data::<()>();
    }
}
