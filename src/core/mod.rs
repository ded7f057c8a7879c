//! Core vocabulary shared by the builder and the engine.
//!
//! This module contains the pure building blocks of a state machine:
//! - State and event definitions via the `State` and `Event` traits
//! - The `Entity` shape contract
//! - Guard predicates and hook callback types

mod entity;
mod guard;
mod hook;
mod state;

pub use entity::Entity;
pub use guard::Guard;
pub use hook::{Hook, HookError, Loader, Saver};
pub use state::{Event, State};
