//! The minimal shape an entity needs to be driven by a state machine.

use super::state::State;
use std::fmt::Debug;
use std::hash::Hash;

/// An identifiable value that carries a current state.
///
/// Entities are created and loaded by the embedding application. During a
/// transition only the state machine (and the hooks it runs) mutates them.
///
/// # Example
///
/// ```rust
/// use switchyard::core::Entity;
/// use switchyard::state_enum;
///
/// state_enum! {
///     pub enum OrderState {
///         Placed,
///         Shipped,
///     }
///     final: [Shipped]
/// }
///
/// #[derive(Clone, Debug)]
/// struct Order {
///     id: u64,
///     state: OrderState,
/// }
///
/// impl Entity for Order {
///     type State = OrderState;
///     type Id = u64;
///
///     fn id(&self) -> &u64 {
///         &self.id
///     }
///
///     fn state(&self) -> &OrderState {
///         &self.state
///     }
///
///     fn set_state(&mut self, state: OrderState) {
///         self.state = state;
///     }
/// }
/// ```
pub trait Entity: Send + Sync + 'static {
    /// The state type stored on the entity.
    type State: State;

    /// Storage key.
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    fn state(&self) -> &Self::State;

    fn set_state(&mut self, state: Self::State);
}
