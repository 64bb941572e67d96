//! Trigger matching.

use super::declaration::{IncreaseFilter, TriggerDeclaration, TriggerKind};
use super::event::{TriggerEvent, TriggerQuery};

/// Matches trigger declarations against resolution queries.
pub struct TriggerValidator;

impl TriggerValidator {
    /// Whether `declaration` fires for `query`.
    ///
    /// Every filter must pass: a declaration scoped to a track never fires
    /// on another track, or when the query has no track at all.
    #[must_use]
    pub fn matches(declaration: &TriggerDeclaration, query: &TriggerQuery) -> bool {
        if let Some(track) = declaration.track {
            if query.track != Some(track) {
                return false;
            }
        }

        match (&declaration.kind, &query.event) {
            (
                TriggerKind::BeforeCardEffectActivation { category, card_id },
                TriggerEvent::BeforeCardEffectActivation {
                    category: used_category,
                    card_id: used_card,
                },
            ) => {
                category.is_none_or(|c| c == *used_category) && card_id.is_none_or(|id| id == *used_card)
            }

            (
                TriggerKind::AfterCardEffectActivation {
                    category,
                    card_id,
                    increased,
                },
                TriggerEvent::AfterCardEffectActivation {
                    category: used_category,
                    card_id: used_card,
                    vitality_increased,
                    increased_modifiers,
                },
            ) => {
                let increase_ok = match increased {
                    None => true,
                    Some(IncreaseFilter::Vitality) => *vitality_increased,
                    Some(IncreaseFilter::Modifier(kind)) => increased_modifiers.contains(kind),
                };
                category.is_none_or(|c| c == *used_category)
                    && card_id.is_none_or(|id| id == *used_card)
                    && increase_ok
            }

            (TriggerKind::CardUsageCount { every }, TriggerEvent::CardUsed { total }) => {
                *every > 0 && *total > 0 && total % every == 0
            }

            (TriggerKind::LessonStart, TriggerEvent::LessonStart) => true,

            (TriggerKind::LifeDecreased, TriggerEvent::LifeDecreased) => true,

            (TriggerKind::ModifierIncreased { kind }, TriggerEvent::ModifiersIncreased { kinds }) => {
                kinds.contains(kind)
            }

            (TriggerKind::TurnStart, TriggerEvent::TurnStart { .. }) => true,

            (TriggerKind::TurnStartEveryNTurns { interval }, TriggerEvent::TurnStart { turn_number }) => {
                *interval > 0 && turn_number % interval == 0
            }

            (TriggerKind::TurnEnd, TriggerEvent::TurnEnd) => true,

            _ => false,
        }
    }
}
