//! Diff vocabulary and causality tags.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, EnhancementSource};
use crate::core::{CardInstanceId, ItemInstanceId, ModifierId};
use crate::modifiers::{ModifierField, ModifierInstance};
use crate::zones::PileChange;

/// One atomic change to a lesson.
///
/// Resource diffs carry the clamped `actual` change that is applied and the
/// nominal `max` that was requested. Only `actual` is ever applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diff {
    Life { actual: i32, max: i32 },
    Vitality { actual: i32, max: i32 },
    Score { actual: i32, max: i32 },

    ModifierAdded { instance: ModifierInstance },
    /// Add `delta` to the modifier's numeric field; a result ≤ 0 removes it.
    ModifierUpdated {
        id: ModifierId,
        field: ModifierField,
        delta: i32,
    },
    ModifierRemoved { id: ModifierId },

    CardPiles(PileChange),
    CardAdded { card: CardInstance },
    CardsEnhanced {
        card_ids: Vec<CardInstanceId>,
        source: EnhancementSource,
    },
    CardEnhancementsRemoved {
        card_ids: Vec<CardInstanceId>,
        source: EnhancementSource,
    },

    ActionPoints { delta: i32 },
    LessonStarted,
    /// Set the activation count of an item.
    ItemActivationCount { item: ItemInstanceId, count: u32 },
    TurnNumberIncreased,
    RemainingTurnsChanged { delta: i32 },
    CardsUsed { delta: u32 },
    /// Modifiers held at turn start; only these decay at turn end.
    ModifiersCaptured { ids: Vector<ModifierId> },
    TurnEnded { ended: bool },
}

/// What caused an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonKind {
    LessonStart,
    MemoryEffect,
    TurnStart,
    Encouragement,
    DelayedEffect { modifier: ModifierId },
    /// Paying for a card: action point, pile move, cost.
    CardUse { card: CardInstanceId },
    /// The card's own effect list.
    CardEffect { card: CardInstanceId },
    ItemActivation { item: ItemInstanceId },
    ModifierActivation { modifier: ModifierId },
    TurnEnd,
    DurationDecay,
    TurnSkip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReason {
    pub kind: ReasonKind,
    /// Turn number when the update happened (0 before the first turn).
    pub turn_number: u32,
}

impl UpdateReason {
    #[must_use]
    pub const fn new(kind: ReasonKind, turn_number: u32) -> Self {
        Self { kind, turn_number }
    }
}

/// A diff tagged with its cause.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonUpdate {
    pub diff: Diff,
    pub reason: UpdateReason,
}

impl LessonUpdate {
    #[must_use]
    pub fn new(diff: Diff, reason: UpdateReason) -> Self {
        Self { diff, reason }
    }
}
