//! Lesson configuration.
//!
//! The configuration surface is consumed once, when a [`Lesson`] is built.
//! It is never consulted again by the runtime API; everything the engine
//! needs afterwards is copied into the lesson value.
//!
//! ```
//! use lesson_engine::core::{LessonConfig, TurnTrack};
//! use lesson_engine::core::CardId;
//!
//! let config = LessonConfig::new(vec![TurnTrack::Vocal, TurnTrack::Dance])
//!     .with_max_life(30)
//!     .with_clear_score(60)
//!     .with_card(CardId::new(1), false);
//!
//! assert_eq!(config.turns.len(), 2);
//! assert_eq!(config.deck.len(), 1);
//! ```
//!
//! [`Lesson`]: crate::lesson::Lesson

use serde::{Deserialize, Serialize};

use super::entity::{CardId, ItemId};
use crate::effects::Effect;

/// Maximum number of cards in hand. Cards drawn beyond it go to discard.
pub const HAND_CAPACITY: usize = 5;

/// One of the three parallel resource tracks a turn belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnTrack {
    Vocal,
    Dance,
    Visual,
}

/// One value per turn track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackValues {
    pub vocal: u32,
    pub dance: u32,
    pub visual: u32,
}

impl TrackValues {
    #[must_use]
    pub const fn new(vocal: u32, dance: u32, visual: u32) -> Self {
        Self { vocal, dance, visual }
    }

    #[must_use]
    pub const fn get(&self, track: TurnTrack) -> u32 {
        match track {
            TurnTrack::Vocal => self.vocal,
            TurnTrack::Dance => self.dance,
            TurnTrack::Visual => self.visual,
        }
    }
}

/// Score thresholds of a lesson.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreThresholds {
    /// Score required to clear the lesson.
    pub clear: i32,
    /// Score at which the lesson is perfect and stops accepting score.
    pub perfect: Option<i32>,
}

/// A card in the starting deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card_id: CardId,
    /// Enhanced before the lesson (permanent enhancement).
    #[serde(default)]
    pub enhanced: bool,
}

/// A producer item in the loadout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLoadout {
    pub item_id: ItemId,
    #[serde(default)]
    pub enhanced: bool,
}

/// Effect resolved at the start of a given turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encouragement {
    pub turn_number: u32,
    pub effect: Effect,
}

/// Probabilistic bonus rolled once at lesson start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEffect {
    /// Chance in percent (0..=100).
    pub chance_percent: u32,
    pub effect: Effect,
}

/// Everything needed to construct a lesson.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonConfig {
    /// Track of every regular turn, in order.
    pub turns: Vec<TurnTrack>,

    #[serde(default)]
    pub score_thresholds: Option<ScoreThresholds>,

    #[serde(default)]
    pub deck: Vec<DeckEntry>,

    #[serde(default)]
    pub items: Vec<ItemLoadout>,

    pub max_life: i32,

    /// Starting life. `None` starts at `max_life`.
    #[serde(default)]
    pub life: Option<i32>,

    #[serde(default)]
    pub encouragements: Vec<Encouragement>,

    #[serde(default)]
    pub memory_effects: Vec<MemoryEffect>,

    /// Per-track score bonus in percent applied after the score formula.
    #[serde(default)]
    pub score_bonus: Option<TrackValues>,

    /// Cards drawn at every turn start.
    #[serde(default = "default_turn_draw")]
    pub turn_draw: usize,

    /// Chance in percent for each drawn, unenhanced card to gain a
    /// turn-local support enhancement.
    #[serde(default)]
    pub support_enhancement_percent: u32,
}

fn default_turn_draw() -> usize {
    HAND_CAPACITY
}

impl LessonConfig {
    /// Create a configuration with the given turn tracks and 30 max life.
    pub fn new(turns: Vec<TurnTrack>) -> Self {
        Self {
            turns,
            score_thresholds: None,
            deck: Vec::new(),
            items: Vec::new(),
            max_life: 30,
            life: None,
            encouragements: Vec::new(),
            memory_effects: Vec::new(),
            score_bonus: None,
            turn_draw: HAND_CAPACITY,
            support_enhancement_percent: 0,
        }
    }

    #[must_use]
    pub fn with_max_life(mut self, max_life: i32) -> Self {
        self.max_life = max_life;
        self
    }

    #[must_use]
    pub fn with_life(mut self, life: i32) -> Self {
        self.life = Some(life);
        self
    }

    /// Set a clear threshold without a perfect threshold.
    #[must_use]
    pub fn with_clear_score(mut self, clear: i32) -> Self {
        self.score_thresholds = Some(ScoreThresholds { clear, perfect: None });
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, clear: i32, perfect: i32) -> Self {
        self.score_thresholds = Some(ScoreThresholds {
            clear,
            perfect: Some(perfect),
        });
        self
    }

    #[must_use]
    pub fn with_card(mut self, card_id: CardId, enhanced: bool) -> Self {
        self.deck.push(DeckEntry { card_id, enhanced });
        self
    }

    #[must_use]
    pub fn with_item(mut self, item_id: ItemId, enhanced: bool) -> Self {
        self.items.push(ItemLoadout { item_id, enhanced });
        self
    }

    #[must_use]
    pub fn with_encouragement(mut self, turn_number: u32, effect: Effect) -> Self {
        self.encouragements.push(Encouragement { turn_number, effect });
        self
    }

    #[must_use]
    pub fn with_memory_effect(mut self, chance_percent: u32, effect: Effect) -> Self {
        self.memory_effects.push(MemoryEffect {
            chance_percent,
            effect,
        });
        self
    }

    #[must_use]
    pub fn with_score_bonus(mut self, bonus: TrackValues) -> Self {
        self.score_bonus = Some(bonus);
        self
    }

    #[must_use]
    pub fn with_turn_draw(mut self, count: usize) -> Self {
        self.turn_draw = count;
        self
    }

    #[must_use]
    pub fn with_support_enhancement(mut self, percent: u32) -> Self {
        self.support_enhancement_percent = percent;
        self
    }
}
