//! Card instances - runtime card state.
//!
//! `CardInstance` is one copy of a card inside a lesson. The only mutable
//! thing about a card is its enhancement list: each entry adds one "+"
//! marker, and any non-empty list selects the enhanced content tier.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, CardInstanceId};

/// Where an enhancement came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnhancementSource {
    /// Enhanced before the lesson; never removed.
    Original,
    /// Enhanced by an effect during the lesson.
    Lesson,
    /// Turn-local enhancement from lesson support; stripped every turn start.
    LessonSupport,
}

/// A card instance in a lesson.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: CardInstanceId,

    /// Reference to the card definition.
    pub card_id: CardId,

    #[serde(default)]
    pub enhancements: Vec<EnhancementSource>,
}

impl CardInstance {
    /// Create an unenhanced card instance.
    #[must_use]
    pub fn new(id: CardInstanceId, card_id: CardId) -> Self {
        Self {
            id,
            card_id,
            enhancements: Vec::new(),
        }
    }

    /// Create an instance carrying one enhancement.
    #[must_use]
    pub fn enhanced(id: CardInstanceId, card_id: CardId, source: EnhancementSource) -> Self {
        Self {
            id,
            card_id,
            enhancements: vec![source],
        }
    }

    /// Whether the enhanced content tier is active.
    #[must_use]
    pub fn is_enhanced(&self) -> bool {
        !self.enhancements.is_empty()
    }

    /// Number of "+" markers to display.
    #[must_use]
    pub fn enhancement_count(&self) -> usize {
        self.enhancements.len()
    }

    #[must_use]
    pub fn has_enhancement_from(&self, source: EnhancementSource) -> bool {
        self.enhancements.contains(&source)
    }

    /// Copy with one more enhancement.
    #[must_use]
    pub fn with_enhancement(&self, source: EnhancementSource) -> Self {
        let mut next = self.clone();
        next.enhancements.push(source);
        next
    }

    /// Copy with every enhancement from `source` removed.
    #[must_use]
    pub fn without_enhancements_from(&self, source: EnhancementSource) -> Self {
        let mut next = self.clone();
        next.enhancements.retain(|s| *s != source);
        next
    }
}
