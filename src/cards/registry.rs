//! Definition store.
//!
//! The static card and item data lives outside the engine. The engine reaches
//! it only through [`DefinitionStore`]; `Registry` is the in-memory
//! implementation used by tests, benches and simple embedders.

use rustc_hash::FxHashMap;

use super::definition::CardDefinition;
use crate::core::{CardId, ItemId};
use crate::items::ItemDefinition;

/// Read-only lookup of static definitions.
pub trait DefinitionStore {
    /// Look up a card definition.
    fn card(&self, id: CardId) -> Option<&CardDefinition>;

    /// Look up a producer item definition.
    fn item(&self, id: ItemId) -> Option<&ItemDefinition>;

    /// Cards a "generate card" effect may produce, in a stable order.
    fn generatable_cards(&self) -> Vec<CardId>;
}

/// Registry of card and item definitions.
///
/// ## Example
///
/// ```
/// use lesson_engine::cards::{CardCategory, CardContent, CardDefinition, DefinitionStore, Registry};
/// use lesson_engine::core::CardId;
/// use lesson_engine::effects::{Cost, Effect};
///
/// let mut registry = Registry::new();
/// registry.register_card(CardDefinition::new(
///     CardId::new(1),
///     "Appeal Basics",
///     CardCategory::Active,
///     CardContent::new(Cost::normal(4)).with_effect(Effect::score(9)),
/// ));
///
/// assert_eq!(registry.card(CardId::new(1)).unwrap().name, "Appeal Basics");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    cards: FxHashMap<CardId, CardDefinition>,
    items: FxHashMap<ItemId, ItemDefinition>,
    generatable: Vec<CardId>,
}

impl Registry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register_card(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Register a card that "generate card" effects may produce.
    pub fn register_generatable_card(&mut self, card: CardDefinition) {
        self.generatable.push(card.id);
        self.register_card(card);
    }

    /// Register a producer item definition.
    ///
    /// Panics if an item with the same ID already exists.
    pub fn register_item(&mut self, item: ItemDefinition) {
        if self.items.contains_key(&item.id) {
            panic!("Item with ID {:?} already registered", item.id);
        }
        self.items.insert(item.id, item);
    }

    /// Number of registered cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Number of registered items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl DefinitionStore for Registry {
    fn card(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    fn item(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items.get(&id)
    }

    fn generatable_cards(&self) -> Vec<CardId> {
        self.generatable.clone()
    }
}
