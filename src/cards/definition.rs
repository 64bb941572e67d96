//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a skill card. A card
//! has base content and, usually, enhanced content; which one is active is
//! decided per instance by its enhancement list.
//!
//! Instance-specific data (enhancements) is stored separately in
//! `CardInstance`.

use serde::{Deserialize, Serialize};

use crate::core::CardId;
use crate::effects::{Condition, Cost, Effect};

/// Card category, used by trigger filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Active,
    Mental,
    Trouble,
}

/// One content tier of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    pub cost: Cost,

    /// Usage condition, checked against the lesson before use.
    #[serde(default)]
    pub condition: Option<Condition>,

    pub effects: Vec<Effect>,

    /// Removed from the lesson after one use.
    #[serde(default)]
    pub used_once: bool,

    /// Moved to the top of the deck before the first draw.
    #[serde(default)]
    pub innate: bool,
}

impl CardContent {
    /// Create content with a cost and no effects.
    #[must_use]
    pub fn new(cost: Cost) -> Self {
        Self {
            cost,
            condition: None,
            effects: Vec::new(),
            used_once: false,
            innate: false,
        }
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the usage condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Mark as once per lesson (builder pattern).
    #[must_use]
    pub fn used_once(mut self) -> Self {
        self.used_once = true;
        self
    }

    /// Mark as entering the hand at lesson start (builder pattern).
    #[must_use]
    pub fn innate(mut self) -> Self {
        self.innate = true;
        self
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use lesson_engine::cards::{CardCategory, CardContent, CardDefinition};
/// use lesson_engine::core::CardId;
/// use lesson_engine::effects::{Cost, Effect};
///
/// let appeal = CardDefinition::new(
///     CardId::new(1),
///     "Appeal Basics",
///     CardCategory::Active,
///     CardContent::new(Cost::normal(4)).with_effect(Effect::score(9)),
/// )
/// .with_enhanced(CardContent::new(Cost::normal(4)).with_effect(Effect::score(14)));
///
/// assert_eq!(appeal.content(false).effects, vec![Effect::score(9)]);
/// assert_eq!(appeal.content(true).effects, vec![Effect::score(14)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    pub category: CardCategory,

    pub base: CardContent,

    /// Enhanced content. Cards without it keep their base content when
    /// enhanced.
    #[serde(default)]
    pub enhanced: Option<CardContent>,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, category: CardCategory, base: CardContent) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            base,
            enhanced: None,
        }
    }

    /// Set the enhanced content (builder pattern).
    #[must_use]
    pub fn with_enhanced(mut self, content: CardContent) -> Self {
        self.enhanced = Some(content);
        self
    }

    /// Content tier selected by enhancement state.
    #[must_use]
    pub fn content(&self, enhanced: bool) -> &CardContent {
        match (&self.enhanced, enhanced) {
            (Some(content), true) => content,
            _ => &self.base,
        }
    }
}
