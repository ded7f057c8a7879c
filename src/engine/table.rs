//! Index of transitions keyed by `(source state, event)`.

use crate::core::{Entity, Event};
use crate::engine::transition::Transition;
use std::collections::HashMap;

/// Append-only lookup table of transitions.
///
/// Filled once while a machine is configured; the machine only ever reads
/// it afterwards, so concurrent lookups are safe.
pub struct TransitionTable<E: Entity, Ev: Event, C = ()> {
    entries: HashMap<E::State, HashMap<Ev, Vec<Transition<E, Ev, C>>>>,
    len: usize,
}

impl<E: Entity, Ev: Event, C> TransitionTable<E, Ev, C> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            len: 0,
        }
    }

    /// Append a transition to the list registered under its `(from, event)`.
    pub fn register(&mut self, transition: Transition<E, Ev, C>) {
        self.entries
            .entry(transition.from.clone())
            .or_default()
            .entry(transition.event.clone())
            .or_default()
            .push(transition);
        self.len += 1;
    }

    /// Transitions registered for `(from, event)`, in registration order.
    ///
    /// Returns an empty slice when nothing is registered.
    pub fn lookup(&self, from: &E::State, event: &Ev) -> &[Transition<E, Ev, C>] {
        self.entries
            .get(from)
            .and_then(|by_event| by_event.get(event))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Events that have at least one transition out of `from`.
    pub fn events_from(&self, from: &E::State) -> Vec<&Ev> {
        self.entries
            .get(from)
            .map(|by_event| by_event.keys().collect())
            .unwrap_or_default()
    }

    /// Every `(from, event)` key with its transitions.
    pub fn entries(&self) -> impl Iterator<Item = (&E::State, &Ev, &[Transition<E, Ev, C>])> {
        self.entries.iter().flat_map(|(from, by_event)| {
            by_event
                .iter()
                .map(move |(event, transitions)| (from, event, transitions.as_slice()))
        })
    }

    /// Number of registered transitions.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<E: Entity, Ev: Event, C> Default for TransitionTable<E, Ev, C> {
    fn default() -> Self {
        Self::new()
    }
}
