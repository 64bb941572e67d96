//! Lesson state: the root aggregate and the idol.
//!
//! ## Lesson
//!
//! One play-through:
//! - score and thresholds
//! - turn number, turn tracks and added turns
//! - card instances and piles
//! - the idol
//! - the per-lesson configuration copied from [`LessonConfig`]
//!
//! ## Idol
//!
//! The acting subject's resources: life, vitality, modifiers, action points,
//! cards used and producer items.
//!
//! Every collection is an `im` persistent structure, so cloning a lesson for
//! a preview or a search branch is O(1) and never shares mutation.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{CardContent, CardInstance, EnhancementSource};
use crate::core::{
    CardInstanceId, EngineContext, Encouragement, ItemInstanceId, LessonConfig, LessonError,
    LessonResult, MemoryEffect, ModifierId, ScoreThresholds, TrackValues, TurnTrack,
};
use crate::items::ProducerItem;
use crate::modifiers::ModifierInstance;
use crate::zones::{shuffle, Piles};

/// The idol's resource state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idol {
    pub life: i32,
    pub max_life: i32,
    pub vitality: i32,

    /// Held modifiers in acquisition order.
    pub modifiers: Vector<ModifierInstance>,

    pub action_points: i32,

    /// Cards used so far this lesson.
    pub total_cards_used: u32,

    pub items: Vector<ProducerItem>,

    /// Modifier ids held when the current turn started.
    pub turn_start_modifier_ids: Vector<ModifierId>,
}

impl Idol {
    #[must_use]
    pub fn new(max_life: i32, life: i32) -> Self {
        Self {
            life,
            max_life,
            vitality: 0,
            modifiers: Vector::new(),
            action_points: 0,
            total_cards_used: 0,
            items: Vector::new(),
            turn_start_modifier_ids: Vector::new(),
        }
    }
}

/// One lesson play-through.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub score: i32,

    /// 0 before the first turn starts, then 1-based.
    pub turn_number: u32,

    /// Track of every regular turn.
    pub turns: Vector<TurnTrack>,

    /// Turns added (or removed) by effects.
    pub remaining_turns_change: i32,

    /// Set once the lesson-start phase has run.
    #[serde(default)]
    pub started: bool,

    /// Set between the end of a turn and the start of the next.
    pub turn_ended: bool,

    pub cards: OrdMap<CardInstanceId, CardInstance>,
    pub piles: Piles,
    pub idol: Idol,

    pub score_thresholds: Option<ScoreThresholds>,
    pub encouragements: Vector<Encouragement>,
    pub memory_effects: Vector<MemoryEffect>,
    pub score_bonus: Option<TrackValues>,
    pub turn_draw: usize,
    pub support_enhancement_percent: u32,
}

impl Lesson {
    /// A lesson with the configured rules but no cards and no items.
    #[must_use]
    pub fn empty(config: &LessonConfig) -> Self {
        Self {
            score: 0,
            turn_number: 0,
            turns: config.turns.iter().copied().collect(),
            remaining_turns_change: 0,
            started: false,
            turn_ended: false,
            cards: OrdMap::new(),
            piles: Piles::default(),
            idol: Idol::new(config.max_life, config.life.unwrap_or(config.max_life)),
            score_thresholds: config.score_thresholds,
            encouragements: config.encouragements.iter().cloned().collect(),
            memory_effects: config.memory_effects.iter().cloned().collect(),
            score_bonus: config.score_bonus,
            turn_draw: config.turn_draw,
            support_enhancement_percent: config.support_enhancement_percent,
        }
    }

    /// Build a lesson from its configuration.
    ///
    /// Every card and item id is checked against the definition store.
    /// Instance ids come from the context's id generator and the deck is
    /// shuffled with its randomness.
    pub fn new(config: &LessonConfig, ctx: &mut EngineContext) -> LessonResult<Self> {
        let mut lesson = Self::empty(config);

        let mut deck = Vector::new();
        for entry in &config.deck {
            ctx.card(entry.card_id)?;
            let id = CardInstanceId::new(ctx.next_id());
            let card = if entry.enhanced {
                CardInstance::enhanced(id, entry.card_id, EnhancementSource::Original)
            } else {
                CardInstance::new(id, entry.card_id)
            };
            lesson.cards.insert(id, card);
            deck.push_back(id);
        }
        shuffle(&mut deck, || ctx.random());
        lesson.piles = Piles::with_deck(deck);

        for loadout in &config.items {
            ctx.item(loadout.item_id)?;
            let id = ItemInstanceId::new(ctx.next_id());
            lesson
                .idol
                .items
                .push_back(ProducerItem::new(id, loadout.item_id, loadout.enhanced));
        }

        debug!(
            cards = lesson.cards.len(),
            items = lesson.idol.items.len(),
            turns = lesson.turns.len(),
            "lesson built"
        );
        Ok(lesson)
    }

    /// Turns left including the current one; 1 on the final turn.
    #[must_use]
    pub fn remaining_turns(&self) -> i32 {
        self.turns.len() as i32 + self.remaining_turns_change - self.turn_number as i32 + 1
    }

    /// Total number of turns after additions.
    #[must_use]
    pub fn total_turns(&self) -> usize {
        (self.turns.len() as i32 + self.remaining_turns_change).max(0) as usize
    }

    /// The turn track list after additions; added turns repeat the last track.
    #[must_use]
    pub fn effective_turns(&self) -> Vec<TurnTrack> {
        let Some(last) = self.turns.last().copied() else {
            return Vec::new();
        };
        (0..self.total_turns())
            .map(|i| self.turns.get(i).copied().unwrap_or(last))
            .collect()
    }

    /// Track of the current turn (the first turn before the lesson starts).
    #[must_use]
    pub fn current_track(&self) -> Option<TurnTrack> {
        let index = self.turn_number.saturating_sub(1) as usize;
        self.turns
            .get(index)
            .or_else(|| self.turns.last())
            .copied()
    }

    /// Score bonus percent of the current track, if configured.
    #[must_use]
    pub fn score_bonus_percent(&self) -> Option<u32> {
        let bonus = self.score_bonus?;
        Some(bonus.get(self.current_track()?))
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.score_thresholds
            .and_then(|t| t.perfect)
            .is_some_and(|perfect| self.score >= perfect)
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.score_thresholds.is_some_and(|t| self.score >= t.clear)
    }

    /// Score still accepted before the perfect threshold; `None` = uncapped.
    #[must_use]
    pub fn remaining_incrementable_score(&self) -> Option<i32> {
        let perfect = self.score_thresholds?.perfect?;
        Some((perfect - self.score).max(0))
    }

    /// The final turn has ended, or the perfect score is reached.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.is_perfect() || (self.turn_ended && self.remaining_turns() <= 1)
    }

    /// A turn has started and not yet ended.
    #[must_use]
    pub fn is_turn_in_progress(&self) -> bool {
        self.turn_number > 0 && !self.turn_ended
    }

    #[must_use]
    pub fn card(&self, id: CardInstanceId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    /// The active content tier of a card instance.
    pub fn card_content<'s>(&self, id: CardInstanceId, ctx: &EngineContext<'s>) -> LessonResult<&'s CardContent> {
        let card = self
            .card(id)
            .ok_or(LessonError::UnknownCardInstance(id))?;
        Ok(ctx.card(card.card_id)?.content(card.is_enhanced()))
    }
}
