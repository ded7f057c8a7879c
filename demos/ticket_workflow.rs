//! Ticket Workflow
//!
//! This example walks a support ticket through its lifecycle.
//!
//! Key concepts:
//! - Guarded targets picked in declaration order
//! - Before/after hooks that edit the ticket
//! - Rejections that leave the stored ticket untouched
//! - Store snapshots in JSON and binary form
//!
//! Run with: RUST_LOG=switchyard=debug cargo run --example ticket_workflow

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use switchyard::builder::{transition, StateMachineConfig};
use switchyard::core::{Entity, State};
use switchyard::store::{EntityStore, MemoryStore, StoreSnapshot};
use switchyard::{event_enum, state_enum, StateMachine, TransitionError};
use tracing_subscriber::EnvFilter;

state_enum! {
    pub enum TicketState {
        Opened,
        InProgress,
        Closed,
        Canceled,
    }
    final: [Closed, Canceled]
}

event_enum! {
    pub enum TicketEvent {
        StartWorking,
        Decision,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Ticket {
    id: u64,
    state: TicketState,
    resolution: String,
    log: Vec<String>,
}

impl Ticket {
    fn new(id: u64, resolution: &str) -> Self {
        Self {
            id,
            state: TicketState::Opened,
            resolution: resolution.to_string(),
            log: Vec::new(),
        }
    }
}

impl Entity for Ticket {
    type State = TicketState;
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn state(&self) -> &TicketState {
        &self.state
    }

    fn set_state(&mut self, state: TicketState) {
        self.state = state;
    }
}

fn build_machine(
    store: Arc<MemoryStore<Ticket>>,
) -> Result<StateMachine<Ticket, TicketEvent>, Box<dyn std::error::Error>> {
    let machine = StateMachineConfig::new(store)
        .transition(
            transition()
                .event(TicketEvent::StartWorking)
                .from(TicketState::Opened)
                .to(TicketState::InProgress)
                .after(|ticket: &mut Ticket, _: &()| {
                    ticket.log.push("picked up".to_string());
                    Ok(())
                }),
        )?
        .transition(
            transition()
                .event(TicketEvent::Decision)
                .from(TicketState::InProgress)
                .to_when(TicketState::Canceled, |t: &Ticket, _: &()| {
                    t.resolution == "cancel"
                })
                .to(TicketState::Closed)
                .before(|ticket: &mut Ticket, _: &()| {
                    if ticket.resolution.is_empty() {
                        return Err("a resolution is required".into());
                    }
                    ticket.log.push(format!("decided: {}", ticket.resolution));
                    Ok(())
                }),
        )?
        .build()?;
    Ok(machine)
}

fn print_ticket(ticket: &Ticket) {
    println!(
        "  ticket {} is {}{} log={:?}",
        ticket.id,
        ticket.state.name(),
        if ticket.state.is_final() { " (final)" } else { "" },
        ticket.log
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Ticket Workflow ===\n");

    let store = Arc::new(MemoryStore::with_entities([
        Ticket::new(1, "done"),
        Ticket::new(2, "cancel"),
        Ticket::new(3, ""),
    ]));
    let machine = build_machine(Arc::clone(&store))?;

    println!("Happy path:");
    machine.on_transition(TicketEvent::StartWorking, &1)?;
    print_ticket(&machine.on_transition(TicketEvent::Decision, &1)?);

    println!("\nGuard picks the cancel target:");
    machine.on_transition(TicketEvent::StartWorking, &2)?;
    print_ticket(&machine.on_transition(TicketEvent::Decision, &2)?);

    println!("\nIllegal event from a final state:");
    match machine.on_transition(TicketEvent::StartWorking, &1) {
        Err(err @ TransitionError::NoApplicableTransition { .. }) => {
            println!("  rejected: {}", err);
        }
        other => println!("  unexpected: {:?}", other.map(|t| t.state)),
    }

    println!("\nBefore hook vetoes the decision:");
    machine.on_transition(TicketEvent::StartWorking, &3)?;
    if let Err(err) = machine.on_transition(TicketEvent::Decision, &3) {
        println!("  rejected: {}", err);
    }
    if let Some(ticket) = store.load(&3)? {
        print_ticket(&ticket);
    }

    println!("\nUnknown ticket:");
    if let Err(err) = machine.on_transition(TicketEvent::StartWorking, &99) {
        println!("  rejected: {}", err);
    }

    println!("\nSnapshot and restore:");
    let snapshot = store.snapshot()?;
    let json = snapshot.to_json()?;
    let bytes = snapshot.to_bytes()?;
    println!(
        "  {} tickets, {} bytes as JSON, {} bytes as binary",
        snapshot.entities.len(),
        json.len(),
        bytes.len()
    );

    let restored = MemoryStore::restore(StoreSnapshot::<Ticket>::from_bytes(&bytes)?)?;
    println!("  restored store holds {} tickets", restored.len()?);

    Ok(())
}
