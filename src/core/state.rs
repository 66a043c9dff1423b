//! Core State trait for table-driven state machines.
//!
//! States form a flat, finite set. Each state is identified by a zero-based
//! index in `[0, MAX_STATES)`; transition tables and state actions are laid
//! out in that index order.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// All methods are pure. `index` and `from_index` must agree: for every
/// state `s`, `Self::from_index(s.index()) == Some(s)`, and every index is
/// below [`State::MAX_STATES`].
///
/// Most callers implement this with [`state_enum!`](crate::state_enum),
/// which uses declaration order as the index order.
///
/// # Example
///
/// ```rust
/// use statemap::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     const MAX_STATES: usize = 2;
///
///     fn index(self) -> usize {
///         self as usize
///     }
///
///     fn from_index(index: usize) -> Option<Self> {
///         match index {
///             0 => Some(Self::Open),
///             1 => Some(Self::Closed),
///             _ => None,
///         }
///     }
///
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Closed.index(), 1);
/// assert_eq!(Door::from_index(0), Some(Door::Open));
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Number of states in the set.
    const MAX_STATES: usize;

    /// Zero-based position of this state in the state map.
    fn index(self) -> usize;

    /// Recover a state from its index, `None` when out of range.
    fn from_index(index: usize) -> Option<Self>;

    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
