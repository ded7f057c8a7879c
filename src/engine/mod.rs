//! Transition resolution and the hook/persistence lifecycle.
//!
//! # Key Concepts
//!
//! - **Transitions**: `(from, event)` rules with guarded targets and hooks
//! - **Table**: Append-only index of transitions, read-only once configured
//! - **State Machine**: Loads an entity, picks the first applicable target,
//!   runs hooks, changes the state and persists the entity
//!
//! Guards are evaluated in a single total order: transitions in registration
//! order, and within a transition, targets in declaration order. The first
//! guard that passes wins.

mod error;
mod machine;
mod table;
mod transition;

pub use error::{HookStage, TransitionError};
pub use machine::StateMachine;
pub use table::TransitionTable;
pub use transition::{Target, Transition};
