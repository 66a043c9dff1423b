//! Macros for declaring state and event enums.

/// Generate a fieldless state enum and its `State` implementation.
///
/// Declaration order is index order, so the first variant has index 0 and
/// `MAX_STATES` is the number of variants. Transition tables and state maps
/// list their entries in this order.
///
/// # Example
///
/// ```
/// use statemap::core::State;
/// use statemap::state_enum;
///
/// state_enum! {
///     pub enum MotorState {
///         Idle,
///         Stop,
///         Start,
///         ChangeSpeed,
///     }
/// }
///
/// assert_eq!(MotorState::MAX_STATES, 4);
/// assert_eq!(MotorState::Start.index(), 2);
/// assert_eq!(MotorState::from_index(3), Some(MotorState::ChangeSpeed));
/// ```
///
/// A state set needs at least one variant:
///
/// ```compile_fail
/// statemap::state_enum! {
///     enum Nothing {}
/// }
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {}
    ) => {
        compile_error!("state_enum! requires at least one variant");
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            const MAX_STATES: usize = {
                let names: &[&str] = &[$(stringify!($variant)),*];
                names.len()
            };

            fn index(self) -> usize {
                self as usize
            }

            fn from_index(index: usize) -> Option<Self> {
                const ALL: &[$name] = &[$($name::$variant),*];
                ALL.get(index).copied()
            }

            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Generate a fieldless event enum and its `Event` implementation.
///
/// # Example
///
/// ```
/// use statemap::core::Event;
/// use statemap::event_enum;
///
/// event_enum! {
///     pub enum MotorEvent {
///         SetSpeed,
///         Halt,
///     }
/// }
///
/// assert_eq!(MotorEvent::Halt.name(), "Halt");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {}
    ) => {
        compile_error!("event_enum! requires at least one variant");
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Event, State};

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    event_enum! {
        enum TestEvent {
            Start,
            Stop,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::MAX_STATES, 3);
        assert_eq!(TestState::Initial.index(), 0);
        assert_eq!(TestState::Complete.index(), 2);
        assert_eq!(TestState::Processing.name(), "Processing");
    }

    #[test]
    fn from_index_covers_every_variant() {
        for index in 0..TestState::MAX_STATES {
            assert_eq!(TestState::from_index(index).unwrap().index(), index);
        }
        assert_eq!(TestState::from_index(TestState::MAX_STATES), None);
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            /// Documented state set.
            pub enum PublicState {
                A,
                B,
            }
        }

        assert_eq!(PublicState::MAX_STATES, 2);
        assert_eq!(PublicState::B.name(), "B");
    }

    #[test]
    fn event_enum_macro_generates_trait() {
        assert_eq!(TestEvent::Start.name(), "Start");
        assert_eq!(TestEvent::Stop.name(), "Stop");
    }
}
