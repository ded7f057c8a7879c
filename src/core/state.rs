//! State and event vocabulary for state machines.
//!
//! States and events are small enumerable values. The engine indexes
//! transitions by `(state, event)`, so both must be hashable.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States are stored on entities,
/// so they must be serializable alongside the rest of the entity.
///
/// # Required Traits
///
/// - `Clone`: States are copied out of transitions onto entities
/// - `Eq` + `Hash`: States key the transition table
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States are persisted with their entity
///
/// # Example
///
/// ```rust
/// use switchyard::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum TicketState {
///     Opened,
///     InProgress,
///     Closed,
///     Canceled,
/// }
///
/// impl State for TicketState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Opened => "Opened",
///             Self::InProgress => "InProgress",
///             Self::Closed => "Closed",
///             Self::Canceled => "Canceled",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Closed | Self::Canceled)
///     }
/// }
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// A machine refuses to build if any transition leaves a final state.
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Trait for events that drive transitions.
///
/// ```rust
/// use switchyard::core::Event;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum TicketEvent {
///     StartWorking,
///     Decision,
/// }
///
/// impl Event for TicketEvent {
///     fn name(&self) -> &str {
///         match self {
///             Self::StartWorking => "StartWorking",
///             Self::Decision => "Decision",
///         }
///     }
/// }
/// ```
pub trait Event: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
