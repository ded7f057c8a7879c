//! Ticket workflow fixtures shared by the integration tests.
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use switchyard::builder::{transition, StateMachineConfig};
use switchyard::core::Entity;
use switchyard::store::{EntityStore, MemoryStore, StoreError};
use switchyard::{event_enum, state_enum, StateMachine};
use uuid::Uuid;

state_enum! {
    pub enum TicketState {
        Opened,
        InProgress,
        Closed,
        Canceled,
    }
    final: [Canceled]
}

event_enum! {
    pub enum TicketEvent {
        StartWorking,
        Decision,
        Reopen,
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub state: TicketState,
    pub value: String,
    pub notes: Vec<String>,
}

impl Ticket {
    pub fn new(value: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: TicketState::Opened,
            value: value.to_string(),
            notes: Vec::new(),
        }
    }

    pub fn in_state(mut self, state: TicketState) -> Self {
        self.state = state;
        self
    }
}

impl Entity for Ticket {
    type State = TicketState;
    type Id = Uuid;

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn state(&self) -> &TicketState {
        &self.state
    }

    fn set_state(&mut self, state: TicketState) {
        self.state = state;
    }
}

/// Memory store that counts calls and can be told to fail saves.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryStore<Ticket>,
    pub loads: AtomicUsize,
    pub saves: AtomicUsize,
    pub fail_saves: AtomicBool,
}

impl RecordingStore {
    pub fn with(tickets: Vec<Ticket>) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::with_entities(tickets),
            ..Self::default()
        })
    }

    pub fn get(&self, id: &Uuid) -> Option<Ticket> {
        self.inner.load(id).ok().flatten()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl EntityStore<Ticket> for RecordingStore {
    fn load(&self, id: &Uuid) -> Result<Option<Ticket>, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(id)
    }

    fn save(&self, entity: &Ticket) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::NotAvailable("writes disabled".to_string()));
        }
        self.inner.save(entity)
    }
}

/// The ticket workflow:
/// `StartWorking: Opened -> InProgress`, and
/// `Decision: InProgress -> Canceled if value == "cancel", else Closed`.
pub fn ticket_config(store: Arc<RecordingStore>) -> StateMachineConfig<Ticket, TicketEvent> {
    StateMachineConfig::new(store)
        .transition(
            transition()
                .event(TicketEvent::StartWorking)
                .from(TicketState::Opened)
                .to(TicketState::InProgress),
        )
        .expect("start working transition")
        .transition(
            transition()
                .event(TicketEvent::Decision)
                .from(TicketState::InProgress)
                .to_when(TicketState::Closed, |t: &Ticket, _: &()| t.value != "cancel")
                .to_when(TicketState::Canceled, |t: &Ticket, _: &()| t.value == "cancel"),
        )
        .expect("decision transition")
}

pub fn ticket_machine(store: Arc<RecordingStore>) -> StateMachine<Ticket, TicketEvent> {
    ticket_config(store).build().expect("ticket machine")
}
