//! Trigger declarations.
//!
//! A declaration says *when* a producer item or reactive modifier fires. It
//! is static data; matching against what just happened is done by
//! [`TriggerValidator`](super::TriggerValidator).

use serde::{Deserialize, Serialize};

use crate::cards::CardCategory;
use crate::core::{CardId, TurnTrack};
use crate::modifiers::ModifierKind;

/// Extra requirement of an after-card trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncreaseFilter {
    /// Vitality increased while the card resolved.
    Vitality,
    /// The held modifier of this kind increased while the card resolved.
    Modifier(ModifierKind),
}

/// The event a trigger listens for, with its kind-specific filters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerKind {
    /// Before a card's effects resolve.
    BeforeCardEffectActivation {
        #[serde(default)]
        category: Option<CardCategory>,
        #[serde(default)]
        card_id: Option<CardId>,
    },

    /// After a card's effects resolved.
    AfterCardEffectActivation {
        #[serde(default)]
        category: Option<CardCategory>,
        #[serde(default)]
        card_id: Option<CardId>,
        #[serde(default)]
        increased: Option<IncreaseFilter>,
    },

    /// Every `every`-th card used this lesson.
    CardUsageCount { every: u32 },

    LessonStart,

    /// Life went down while a card resolved.
    LifeDecreased,

    /// The held modifier of `kind` went up while a card resolved.
    ModifierIncreased { kind: ModifierKind },

    TurnStart,

    TurnEnd,

    /// Turn start of every turn number divisible by `interval`.
    TurnStartEveryNTurns { interval: u32 },
}

/// A trigger: an event kind plus an optional turn-track scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDeclaration {
    pub kind: TriggerKind,

    /// Only fire on turns of this track.
    #[serde(default)]
    pub track: Option<TurnTrack>,
}

impl TriggerDeclaration {
    #[must_use]
    pub fn new(kind: TriggerKind) -> Self {
        Self { kind, track: None }
    }

    pub fn lesson_start() -> Self {
        Self::new(TriggerKind::LessonStart)
    }

    pub fn turn_start() -> Self {
        Self::new(TriggerKind::TurnStart)
    }

    pub fn turn_end() -> Self {
        Self::new(TriggerKind::TurnEnd)
    }

    pub fn every_n_turns(interval: u32) -> Self {
        Self::new(TriggerKind::TurnStartEveryNTurns { interval })
    }

    pub fn card_usage_count(every: u32) -> Self {
        Self::new(TriggerKind::CardUsageCount { every })
    }

    pub fn life_decreased() -> Self {
        Self::new(TriggerKind::LifeDecreased)
    }

    pub fn modifier_increased(kind: ModifierKind) -> Self {
        Self::new(TriggerKind::ModifierIncreased { kind })
    }

    /// Before any card, optionally limited to a category.
    pub fn before_card(category: Option<CardCategory>) -> Self {
        Self::new(TriggerKind::BeforeCardEffectActivation {
            category,
            card_id: None,
        })
    }

    /// After any card, optionally limited to a category.
    pub fn after_card(category: Option<CardCategory>) -> Self {
        Self::new(TriggerKind::AfterCardEffectActivation {
            category,
            card_id: None,
            increased: None,
        })
    }

    /// After a card that increased vitality or the given modifier.
    pub fn after_card_increasing(increased: IncreaseFilter) -> Self {
        Self::new(TriggerKind::AfterCardEffectActivation {
            category: None,
            card_id: None,
            increased: Some(increased),
        })
    }

    /// Restrict to one turn track (builder pattern).
    #[must_use]
    pub fn on_track(mut self, track: TurnTrack) -> Self {
        self.track = Some(track);
        self
    }
}
