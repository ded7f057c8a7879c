//! State machine that fires events against stored entities.

use crate::core::{Entity, Event, HookError, Loader, Saver, State};
use crate::engine::error::{HookStage, TransitionError};
use crate::engine::table::TransitionTable;
use crate::engine::transition::Transition;
use crate::store::EntityStore;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Resolves and applies transitions for entities held in a store.
///
/// The machine keeps no per-call state: each call loads the entity, picks a
/// transition, runs its hooks, changes the state and saves the entity.
/// Calls for different ids may run concurrently.
///
/// # Concurrency
///
/// Calls for the *same* id are not serialised. Two racing calls can both
/// load the same copy and the later save overwrites the earlier one. Callers
/// must either serialise per id or use a store whose `save` rejects stale
/// versions.
pub struct StateMachine<E: Entity, Ev: Event, C = ()> {
    table: TransitionTable<E, Ev, C>,
    store: Arc<dyn EntityStore<E>>,
    loader: Option<Loader<E>>,
    saver: Option<Saver<E>>,
}

impl<E: Entity, Ev: Event, C: 'static> StateMachine<E, Ev, C> {
    pub(crate) fn from_parts(
        table: TransitionTable<E, Ev, C>,
        store: Arc<dyn EntityStore<E>>,
        loader: Option<Loader<E>>,
        saver: Option<Saver<E>>,
    ) -> Self {
        Self {
            table,
            store,
            loader,
            saver,
        }
    }

    /// Read-only view of the registered transitions.
    pub fn table(&self) -> &TransitionTable<E, Ev, C> {
        &self.table
    }

    /// Fire `event` for the entity stored under `id` with a default context.
    pub fn on_transition(&self, event: Ev, id: &E::Id) -> Result<E, TransitionError>
    where
        C: Default,
    {
        self.on_transition_with(event, id, &C::default())
    }

    /// Fire `event` for the entity stored under `id`.
    ///
    /// Runs load, match, before hook, state change, after hook and persist,
    /// in that order, and returns the persisted entity. A failing before hook
    /// aborts with nothing changed. A failing after hook does not stop
    /// persistence; the error then reports whether the save went through.
    #[instrument(skip_all, fields(event = %event.name(), id = ?id))]
    pub fn on_transition_with(
        &self,
        event: Ev,
        id: &E::Id,
        context: &C,
    ) -> Result<E, TransitionError> {
        let mut entity = self.load(&event, id)?;
        let from = entity.state().clone();

        let Some((transition, to)) = self.select(&entity, &event, context) else {
            warn!(state = from.name(), "Event rejected, no applicable transition");
            return Err(TransitionError::NoApplicableTransition {
                state: from.name().to_string(),
                event: event.name().to_string(),
            });
        };
        let to = to.clone();

        if let Some(before) = &transition.before {
            before(&mut entity, context)
                .map_err(|source| hook_failed(HookStage::Before, &event, source))?;
        }

        entity.set_state(to.clone());

        let after = match &transition.after {
            Some(after) => after(&mut entity, context),
            None => Ok(()),
        };
        let persisted = self.persist(&event, &entity);

        match (after, persisted) {
            (Ok(()), Ok(())) => {
                info!(from = from.name(), to = to.name(), "Transition applied");
                Ok(entity)
            }
            (Ok(()), Err(err)) => Err(err),
            (Err(source), persisted) => {
                let persist_error = persisted.err().map(Box::new);
                if let Some(err) = &persist_error {
                    error!(error = %err, "Persistence failed after after-hook failure");
                }
                warn!(
                    from = from.name(),
                    to = to.name(),
                    persisted = persist_error.is_none(),
                    "After hook failed"
                );
                Err(TransitionError::AfterHookFailed {
                    event: event.name().to_string(),
                    from: from.name().to_string(),
                    to: to.name().to_string(),
                    persisted: persist_error.is_none(),
                    persist_error,
                    source,
                })
            }
        }
    }

    /// Target state `event` would move `entity` to, without side effects.
    pub fn resolve(&self, entity: &E, event: &Ev, context: &C) -> Option<&E::State> {
        self.select(entity, event, context).map(|(_, to)| to)
    }

    /// Whether `event` has an applicable transition for `entity` (pure).
    pub fn can_fire(&self, entity: &E, event: &Ev, context: &C) -> bool {
        self.select(entity, event, context).is_some()
    }

    /// First matching target across candidates, in registration order and
    /// then declaration order.
    fn select(
        &self,
        entity: &E,
        event: &Ev,
        context: &C,
    ) -> Option<(&Transition<E, Ev, C>, &E::State)> {
        let state = entity.state();
        let candidates = self.table.lookup(state, event);
        debug!(
            state = state.name(),
            candidates = candidates.len(),
            "Resolving transition"
        );

        candidates.iter().find_map(|transition| {
            transition
                .select(entity, context)
                .map(|to| (transition, to))
        })
    }

    fn load(&self, event: &Ev, id: &E::Id) -> Result<E, TransitionError> {
        let loaded = match &self.loader {
            Some(loader) => {
                loader(id).map_err(|source| hook_failed(HookStage::BeforeAll, event, source))?
            }
            None => self.store.load(id)?,
        };

        loaded.ok_or_else(|| {
            warn!("Entity not found");
            TransitionError::EntityNotFound {
                id: format!("{id:?}"),
            }
        })
    }

    fn persist(&self, event: &Ev, entity: &E) -> Result<(), TransitionError> {
        match &self.saver {
            Some(saver) => {
                saver(entity).map_err(|source| hook_failed(HookStage::AfterAll, event, source))
            }
            None => Ok(self.store.save(entity)?),
        }
    }
}

fn hook_failed<Ev: Event>(stage: HookStage, event: &Ev, source: HookError) -> TransitionError {
    TransitionError::HookFailed {
        stage,
        event: event.name().to_string(),
        source,
    }
}
