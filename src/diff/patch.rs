//! Patch reducer.
//!
//! `patch` is a left fold: diffs land strictly in slice order, because later
//! diffs of a batch were computed against a state where earlier ones had
//! already landed. Well-formed diffs never fail; affordability was checked
//! when they were produced.

use crate::lesson::Lesson;

use super::update::{Diff, LessonUpdate};

/// Apply `diffs` to a copy of `lesson`.
#[must_use]
pub fn patch(lesson: &Lesson, diffs: &[Diff]) -> Lesson {
    let mut next = lesson.clone();
    for diff in diffs {
        apply_diff(&mut next, diff);
    }
    next
}

/// Apply the diffs of `updates` to a copy of `lesson`.
#[must_use]
pub fn patch_updates<'a>(lesson: &Lesson, updates: impl IntoIterator<Item = &'a LessonUpdate>) -> Lesson {
    let mut next = lesson.clone();
    for update in updates {
        apply_diff(&mut next, &update.diff);
    }
    next
}

/// Apply one diff in place.
pub fn apply_diff(lesson: &mut Lesson, diff: &Diff) {
    let idol = &mut lesson.idol;
    match diff {
        Diff::Life { actual, .. } => idol.life += actual,
        Diff::Vitality { actual, .. } => idol.vitality += actual,
        Diff::Score { actual, .. } => lesson.score += actual,

        Diff::ModifierAdded { instance } => idol.modifiers.push_back(instance.clone()),

        Diff::ModifierUpdated { id, delta, .. } => {
            let Some(index) = idol.modifiers.iter().position(|m| m.id == *id) else {
                return;
            };
            let updated = idol.modifiers[index].value() + delta;
            if updated > 0 {
                let modifier = idol.modifiers[index].modifier.with_value(updated);
                idol.modifiers[index].modifier = modifier;
            } else {
                idol.modifiers.remove(index);
            }
        }

        Diff::ModifierRemoved { id } => idol.modifiers.retain(|m| m.id != *id),

        Diff::CardPiles(change) => lesson.piles.apply(change),

        Diff::CardAdded { card } => {
            lesson.cards.insert(card.id, card.clone());
        }

        Diff::CardsEnhanced { card_ids, source } => {
            for id in card_ids {
                if let Some(card) = lesson.cards.get(id) {
                    let enhanced = card.with_enhancement(*source);
                    lesson.cards.insert(*id, enhanced);
                }
            }
        }

        Diff::CardEnhancementsRemoved { card_ids, source } => {
            for id in card_ids {
                if let Some(card) = lesson.cards.get(id) {
                    let stripped = card.without_enhancements_from(*source);
                    lesson.cards.insert(*id, stripped);
                }
            }
        }

        Diff::ActionPoints { delta } => idol.action_points += delta,

        Diff::ItemActivationCount { item, count } => {
            if let Some(index) = idol.items.iter().position(|i| i.id == *item) {
                idol.items[index].activation_count = *count;
            }
        }

        Diff::LessonStarted => lesson.started = true,
        Diff::TurnNumberIncreased => lesson.turn_number += 1,
        Diff::RemainingTurnsChanged { delta } => lesson.remaining_turns_change += delta,
        Diff::CardsUsed { delta } => idol.total_cards_used += delta,
        Diff::ModifiersCaptured { ids } => idol.turn_start_modifier_ids = ids.clone(),
        Diff::TurnEnded { ended } => lesson.turn_ended = *ended,
    }
}
