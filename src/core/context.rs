//! Injected collaborators for every engine call.
//!
//! The engine has no ambient state. Each call that may shuffle, roll or
//! allocate ids receives an `EngineContext` carrying:
//! - the read-only definition store,
//! - a randomness function returning uniform values in `[0, 1)`,
//! - an id generator.
//!
//! Supplying the same context twice (same store, same function states)
//! reproduces the same diffs, which is what makes previews and replays exact.

use crate::cards::{CardDefinition, DefinitionStore};
use crate::items::ItemDefinition;

use super::entity::{CardId, IdSequence, ItemId};
use super::error::{LessonError, LessonResult};
use super::rng::GameRng;

/// Collaborators injected into engine calls.
pub struct EngineContext<'a> {
    store: &'a dyn DefinitionStore,
    random: Box<dyn FnMut() -> f64 + 'a>,
    next_id: Box<dyn FnMut() -> u32 + 'a>,
}

impl<'a> EngineContext<'a> {
    /// Create a context from explicit functions.
    pub fn new(
        store: &'a dyn DefinitionStore,
        random: impl FnMut() -> f64 + 'a,
        next_id: impl FnMut() -> u32 + 'a,
    ) -> Self {
        Self {
            store,
            random: Box::new(random),
            next_id: Box::new(next_id),
        }
    }

    /// Create a context backed by a seeded [`GameRng`] and an [`IdSequence`].
    pub fn seeded(store: &'a dyn DefinitionStore, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let mut ids = IdSequence::new();
        Self::new(store, move || rng.next_f64(), move || ids.next_id())
    }

    /// Replace the randomness function (builder pattern).
    #[must_use]
    pub fn with_random(mut self, random: impl FnMut() -> f64 + 'a) -> Self {
        self.random = Box::new(random);
        self
    }

    /// The definition store.
    #[must_use]
    pub fn store(&self) -> &'a dyn DefinitionStore {
        self.store
    }

    /// Next uniform value in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        (self.random)()
    }

    /// Next raw id.
    pub fn next_id(&mut self) -> u32 {
        (self.next_id)()
    }

    /// Look up a card definition.
    pub fn card(&self, id: CardId) -> LessonResult<&'a CardDefinition> {
        self.store.card(id).ok_or(LessonError::UnknownCard(id))
    }

    /// Look up a producer item definition.
    pub fn item(&self, id: ItemId) -> LessonResult<&'a ItemDefinition> {
        self.store.item(id).ok_or(LessonError::UnknownItem(id))
    }
}

impl std::fmt::Debug for EngineContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext").finish_non_exhaustive()
    }
}
