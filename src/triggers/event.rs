//! Resolution queries.
//!
//! A query describes what just happened during resolution. The orchestrator
//! builds one per trigger point and asks every item and reactive modifier
//! whether its declaration matches.

use smallvec::SmallVec;

use crate::cards::CardCategory;
use crate::core::{CardId, TurnTrack};
use crate::modifiers::ModifierKind;

/// What just happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    BeforeCardEffectActivation {
        category: CardCategory,
        card_id: CardId,
    },

    AfterCardEffectActivation {
        category: CardCategory,
        card_id: CardId,
        vitality_increased: bool,
        /// Modifier kinds whose held value went up during the card.
        increased_modifiers: SmallVec<[ModifierKind; 4]>,
    },

    /// A card was used; `total` counts every card used this lesson.
    CardUsed { total: u32 },

    LessonStart,

    LifeDecreased,

    ModifiersIncreased { kinds: SmallVec<[ModifierKind; 4]> },

    TurnStart { turn_number: u32 },

    TurnEnd,
}

/// An event plus the track of the turn it happened in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerQuery {
    pub event: TriggerEvent,
    pub track: Option<TurnTrack>,
}

impl TriggerQuery {
    #[must_use]
    pub fn new(event: TriggerEvent, track: Option<TurnTrack>) -> Self {
        Self { event, track }
    }
}
