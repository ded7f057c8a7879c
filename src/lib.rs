//! Switchyard: an embeddable finite state machine engine for stored entities.
//!
//! An application registers transitions once at startup. At runtime it
//! fires an event for an entity id, and the engine does the rest: it loads
//! the entity, picks the single applicable transition, runs its hooks,
//! changes the state and persists the entity through an injected store.
//!
//! # Core Concepts
//!
//! - **State / Event**: Enumerable vocabulary via the `State` and `Event` traits
//! - **Entity**: Anything with an id and a current state
//! - **Transitions**: `(from, event)` rules with one or more guarded targets
//!   and optional before/after hooks
//! - **Store**: Load-by-id and save, supplied by the application
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use switchyard::builder::{transition, StateMachineConfig};
//! use switchyard::core::Entity;
//! use switchyard::store::{EntityStore, MemoryStore};
//! use switchyard::{event_enum, state_enum};
//!
//! state_enum! {
//!     pub enum TicketState {
//!         Opened,
//!         InProgress,
//!         Closed,
//!         Canceled,
//!     }
//!     final: [Closed, Canceled]
//! }
//!
//! event_enum! {
//!     pub enum TicketEvent {
//!         StartWorking,
//!         Decision,
//!     }
//! }
//!
//! #[derive(Clone, Debug)]
//! struct Ticket {
//!     id: String,
//!     state: TicketState,
//!     value: String,
//! }
//!
//! impl Entity for Ticket {
//!     type State = TicketState;
//!     type Id = String;
//!     fn id(&self) -> &String { &self.id }
//!     fn state(&self) -> &TicketState { &self.state }
//!     fn set_state(&mut self, state: TicketState) { self.state = state; }
//! }
//!
//! let store: Arc<MemoryStore<Ticket>> = Arc::new(MemoryStore::new());
//! store.save(&Ticket {
//!     id: "t-1".to_string(),
//!     state: TicketState::Opened,
//!     value: "cancel".to_string(),
//! }).unwrap();
//!
//! let machine = StateMachineConfig::<Ticket, TicketEvent>::new(store.clone())
//!     .transition(
//!         transition()
//!             .event(TicketEvent::StartWorking)
//!             .from(TicketState::Opened)
//!             .to(TicketState::InProgress),
//!     )
//!     .unwrap()
//!     .transition(
//!         transition()
//!             .event(TicketEvent::Decision)
//!             .from(TicketState::InProgress)
//!             .to_when(TicketState::Canceled, |t: &Ticket, _: &()| t.value == "cancel")
//!             .to(TicketState::Closed),
//!     )
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let id = "t-1".to_string();
//! machine.on_transition(TicketEvent::StartWorking, &id).unwrap();
//! let ticket = machine.on_transition(TicketEvent::Decision, &id).unwrap();
//! assert_eq!(ticket.state, TicketState::Canceled);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod store;

// Re-export commonly used types
pub use crate::builder::{transition, BuildError, StateMachineConfig, TransitionBuilder};
pub use crate::core::{Entity, Event, Guard, HookError, State};
pub use crate::engine::{HookStage, StateMachine, Transition, TransitionError, TransitionTable};
pub use crate::store::{EntityStore, MemoryStore, StoreError};
