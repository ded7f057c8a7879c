//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for registering
//! transitions at startup with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, ConfigViolation, OverrideKind};
pub use machine::StateMachineConfig;
pub use transition::TransitionBuilder;

use crate::core::{Entity, Event, Guard};
use crate::engine::{Target, Transition};

/// Start building a transition.
pub fn transition<E, Ev, C>() -> TransitionBuilder<E, Ev, C>
where
    E: Entity,
    Ev: Event,
    C: 'static,
{
    TransitionBuilder::new()
}

/// Create an unconditional single-target transition without hooks.
///
/// # Example
///
/// ```
/// use switchyard::builder::simple_transition;
/// use switchyard::core::Entity;
/// use switchyard::{event_enum, state_enum};
///
/// state_enum! {
///     enum DoorState {
///         Closed,
///         Open,
///     }
/// }
///
/// event_enum! {
///     enum DoorEvent {
///         Push,
///     }
/// }
///
/// struct Door {
///     id: u8,
///     state: DoorState,
/// }
///
/// impl Entity for Door {
///     type State = DoorState;
///     type Id = u8;
///     fn id(&self) -> &u8 { &self.id }
///     fn state(&self) -> &DoorState { &self.state }
///     fn set_state(&mut self, state: DoorState) { self.state = state; }
/// }
///
/// let push =
///     simple_transition::<Door, _, ()>(DoorEvent::Push, DoorState::Closed, DoorState::Open);
/// assert!(push.is_exhaustive());
/// ```
pub fn simple_transition<E, Ev, C>(event: Ev, from: E::State, to: E::State) -> Transition<E, Ev, C>
where
    E: Entity,
    Ev: Event,
{
    Transition::new(event, from, vec![Target::new(to, None)])
}

/// Create a single-target transition with a guard predicate.
pub fn guarded_transition<E, Ev, C, F>(
    event: Ev,
    from: E::State,
    to: E::State,
    guard: F,
) -> Transition<E, Ev, C>
where
    E: Entity,
    Ev: Event,
    F: Fn(&E, &C) -> bool + Send + Sync + 'static,
{
    Transition::new(event, from, vec![Target::new(to, Some(Guard::new(guard)))])
}
