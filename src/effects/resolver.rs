//! Effect resolution - turning effects into diffs.
//!
//! The `EffectResolver` reads a lesson snapshot and produces the ordered
//! diffs an effect causes. It never mutates the lesson; the caller patches
//! the diffs in and decides which snapshot conditions are checked against.

use crate::cards::{CardInstance, EnhancementSource};
use crate::core::{pick_index, CardInstanceId, EngineContext, ModifierId};
use crate::diff::Diff;
use crate::lesson::Lesson;
use crate::modifiers::{find_modifier, modifier_value, Modifier, ModifierField, ModifierInstance, ModifierKind};

use super::condition::ConditionEvaluator;
use super::effect::{Effect, LeverageTarget, ScoreGain, VitalityGain, VitalityReduction};
use super::formula::{calculate_score, calculate_vitality, ceil_percent};

/// Resolves effects against lesson snapshots.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve an effect, checking any condition against `lesson` itself.
    ///
    /// A failed condition yields no diffs.
    pub fn resolve(lesson: &Lesson, effect: &Effect, ctx: &mut EngineContext) -> Vec<Diff> {
        Self::resolve_if(lesson, lesson, effect, ctx).unwrap_or_default()
    }

    /// Resolve an effect whose conditions are checked against
    /// `condition_lesson`, typically the snapshot from before the action.
    ///
    /// Returns `None` when a condition fails, as opposed to `Some` of an
    /// empty list for an effect that simply changed nothing.
    pub fn resolve_if(
        lesson: &Lesson,
        condition_lesson: &Lesson,
        effect: &Effect,
        ctx: &mut EngineContext,
    ) -> Option<Vec<Diff>> {
        match effect {
            Effect::Conditional { condition, effect } => {
                if !ConditionEvaluator::evaluate(condition_lesson, condition) {
                    return None;
                }
                Self::resolve_if(lesson, condition_lesson, effect, ctx)
            }
            other => Some(Self::resolve_unconditional(lesson, other, ctx)),
        }
    }

    fn resolve_unconditional(lesson: &Lesson, effect: &Effect, ctx: &mut EngineContext) -> Vec<Diff> {
        let idol = &lesson.idol;

        match effect {
            Effect::DrainLife { value } => {
                if *value <= 0 {
                    return Vec::new();
                }
                vec![Diff::Life {
                    actual: -idol.life.clamp(0, *value),
                    max: -value,
                }]
            }

            Effect::RecoverLife { value } => {
                if *value <= 0 {
                    return Vec::new();
                }
                let room = (idol.max_life - idol.life).max(0);
                vec![Diff::Life {
                    actual: (*value).min(room),
                    max: *value,
                }]
            }

            Effect::DrawCards { amount } => {
                let mut piles = lesson.piles.clone();
                piles.draw(*amount as usize, || ctx.random());
                lesson.piles.change_to(&piles).map(Diff::CardPiles).into_iter().collect()
            }

            Effect::ExchangeHand => {
                let mut piles = lesson.piles.clone();
                let discarded = piles.discard_hand();
                piles.draw(discarded, || ctx.random());
                lesson.piles.change_to(&piles).map(Diff::CardPiles).into_iter().collect()
            }

            Effect::EnhanceHand => {
                if lesson.piles.hand.is_empty() {
                    return Vec::new();
                }
                vec![Diff::CardsEnhanced {
                    card_ids: lesson.piles.hand.iter().copied().collect(),
                    source: EnhancementSource::Lesson,
                }]
            }

            Effect::GenerateCard => Self::generate_card(lesson, ctx),

            Effect::IncreaseRemainingTurns { amount } => {
                if *amount == 0 {
                    return Vec::new();
                }
                vec![Diff::RemainingTurnsChanged { delta: *amount }]
            }

            Effect::GetModifier { modifier } => Self::acquire_modifier(lesson, modifier, ctx),

            Effect::MultiplyModifier { kind, percentage } => {
                let Some(held) = find_modifier(&idol.modifiers, *kind) else {
                    return Vec::new();
                };
                let current = held.value();
                let delta = ceil_percent(current, *percentage) - current;
                if delta == 0 {
                    return Vec::new();
                }
                vec![Diff::ModifierUpdated {
                    id: held.id,
                    field: held.modifier.field(),
                    delta,
                }]
            }

            Effect::Perform { score, vitality } => {
                let mut diffs = Vec::new();
                if let Some(gain) = score {
                    diffs.extend(Self::score_diffs(lesson, gain));
                }
                if let Some(gain) = vitality {
                    diffs.push(Self::vitality_diff(lesson, gain));
                }
                diffs
            }

            Effect::PerformLeveragingModifier {
                kind,
                percentage,
                target,
            } => {
                let base = ceil_percent(modifier_value(&idol.modifiers, *kind), *percentage);
                match target {
                    LeverageTarget::Score => Self::score_diffs(lesson, &ScoreGain::new(base)),
                    LeverageTarget::Vitality => vec![Self::vitality_diff(lesson, &VitalityGain::new(base))],
                }
            }

            Effect::PerformLeveragingVitality { percentage, reduction } => {
                let vitality = idol.vitality;
                let mut diffs = Vec::new();

                let reduced_by = match reduction {
                    Some(VitalityReduction::Halve) => vitality - vitality.div_euclid(2),
                    Some(VitalityReduction::Zero) => vitality,
                    None => 0,
                };
                if reduced_by > 0 {
                    diffs.push(Diff::Vitality {
                        actual: -reduced_by,
                        max: -reduced_by,
                    });
                }

                // Score reads the vitality from before the reduction.
                let base = ceil_percent(vitality, *percentage);
                diffs.extend(Self::score_diffs(lesson, &ScoreGain::new(base)));
                diffs
            }

            // Conditions are peeled off by `resolve_if`.
            Effect::Conditional { effect, .. } => Self::resolve_unconditional(lesson, effect, ctx),
        }
    }

    /// One score diff per repetition, each clamped to what is left before
    /// the perfect threshold.
    fn score_diffs(lesson: &Lesson, gain: &ScoreGain) -> Vec<Diff> {
        let value = calculate_score(lesson, gain);
        let mut remaining = lesson.remaining_incrementable_score();

        (0..gain.times)
            .map(|_| {
                let actual = match remaining.as_mut() {
                    Some(left) => {
                        let actual = value.min(*left);
                        *left -= actual.max(0);
                        actual
                    }
                    None => value,
                };
                Diff::Score { actual, max: value }
            })
            .collect()
    }

    fn vitality_diff(lesson: &Lesson, gain: &VitalityGain) -> Diff {
        let value = calculate_vitality(lesson, gain);
        Diff::Vitality {
            actual: value,
            max: value,
        }
    }

    fn acquire_modifier(lesson: &Lesson, modifier: &Modifier, ctx: &mut EngineContext) -> Vec<Diff> {
        let modifiers = &lesson.idol.modifiers;

        if modifier.is_debuff() {
            if let Some(protection) = find_modifier(modifiers, ModifierKind::DebuffProtection) {
                return vec![Diff::ModifierUpdated {
                    id: protection.id,
                    field: ModifierField::Times,
                    delta: -1,
                }];
            }
        }

        if modifier.is_merging() {
            if let Some(held) = find_modifier(modifiers, modifier.kind()) {
                if modifier.value() == 0 {
                    return Vec::new();
                }
                return vec![Diff::ModifierUpdated {
                    id: held.id,
                    field: held.modifier.field(),
                    delta: modifier.value(),
                }];
            }
        }

        if modifier.value() <= 0 {
            return Vec::new();
        }
        vec![Diff::ModifierAdded {
            instance: ModifierInstance::new(ModifierId::new(ctx.next_id()), modifier.clone()),
        }]
    }

    fn generate_card(lesson: &Lesson, ctx: &mut EngineContext) -> Vec<Diff> {
        let candidates = ctx.store().generatable_cards();
        let Some(index) = pick_index(candidates.len(), ctx.random()) else {
            return Vec::new();
        };

        let id = CardInstanceId::new(ctx.next_id());
        let card = CardInstance::enhanced(id, candidates[index], EnhancementSource::Lesson);

        let mut piles = lesson.piles.clone();
        piles.add_generated(id);

        let mut diffs = vec![Diff::CardAdded { card }];
        diffs.extend(lesson.piles.change_to(&piles).map(Diff::CardPiles));
        diffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCategory, CardContent, CardDefinition, Registry};
    use crate::core::{CardId, LessonConfig, TurnTrack};
    use crate::diff::patch;
    use crate::effects::{Condition, Cost};
    use crate::triggers::TriggerDeclaration;
    use im::Vector;

    fn lesson() -> Lesson {
        Lesson::empty(&LessonConfig::new(vec![TurnTrack::Vocal; 4]).with_thresholds(60, 100))
    }

    fn with_modifiers(mut lesson: Lesson, modifiers: Vec<Modifier>) -> Lesson {
        lesson.idol.modifiers = modifiers
            .into_iter()
            .enumerate()
            .map(|(i, m)| ModifierInstance::new(ModifierId::new(i as u32 + 1), m))
            .collect();
        lesson
    }

    fn ids(raw: &[u32]) -> Vector<CardInstanceId> {
        raw.iter().copied().map(CardInstanceId::new).collect()
    }

    #[test]
    fn test_score_effect() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let diffs = EffectResolver::resolve(&lesson(), &Effect::score(9), &mut ctx);
        assert_eq!(diffs, vec![Diff::Score { actual: 9, max: 9 }]);
    }

    #[test]
    fn test_score_repetitions_clamp_to_perfect() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let mut lesson = lesson();
        lesson.score = 90;

        let effect = Effect::perform(Some(ScoreGain::new(6).times(3)), None);
        let diffs = EffectResolver::resolve(&lesson, &effect, &mut ctx);
        assert_eq!(
            diffs,
            vec![
                Diff::Score { actual: 6, max: 6 },
                Diff::Score { actual: 4, max: 6 },
                Diff::Score { actual: 0, max: 6 },
            ]
        );
    }

    #[test]
    fn test_leverage_vitality_halves_then_scores() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let mut lesson = lesson();
        lesson.idol.vitality = 10;

        let effect = Effect::leverage_vitality(130, Some(VitalityReduction::Halve));
        let diffs = EffectResolver::resolve(&lesson, &effect, &mut ctx);
        assert_eq!(
            diffs,
            vec![
                Diff::Vitality { actual: -5, max: -5 },
                Diff::Score { actual: 13, max: 13 },
            ]
        );
    }

    #[test]
    fn test_leverage_modifier() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let lesson = with_modifiers(lesson(), vec![Modifier::motivation(5)]);

        let to_vitality = Effect::leverage_modifier(ModifierKind::Motivation, 150, LeverageTarget::Vitality);
        // ceil(5 × 1.5) = 8, plus motivation 5
        assert_eq!(
            EffectResolver::resolve(&lesson, &to_vitality, &mut ctx),
            vec![Diff::Vitality { actual: 13, max: 13 }]
        );

        let to_score = Effect::leverage_modifier(ModifierKind::Motivation, 200, LeverageTarget::Score);
        assert_eq!(
            EffectResolver::resolve(&lesson, &to_score, &mut ctx),
            vec![Diff::Score { actual: 10, max: 10 }]
        );
    }

    #[test]
    fn test_acquire_merges_into_existing() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let lesson = with_modifiers(lesson(), vec![Modifier::good_condition(1), Modifier::focus(2)]);

        let diffs = EffectResolver::resolve(&lesson, &Effect::get_modifier(Modifier::focus(3)), &mut ctx);
        assert_eq!(
            diffs,
            vec![Diff::ModifierUpdated {
                id: ModifierId::new(2),
                field: ModifierField::Amount,
                delta: 3,
            }]
        );
    }

    #[test]
    fn test_acquire_non_merging_appends() {
        let store = Registry::new();
        let mut ctx = EngineContext::new(&store, || 0.0, || 77);
        let lesson = with_modifiers(lesson(), vec![Modifier::double_effect(1)]);

        let diffs = EffectResolver::resolve(&lesson, &Effect::get_modifier(Modifier::double_effect(1)), &mut ctx);
        assert_eq!(
            diffs,
            vec![Diff::ModifierAdded {
                instance: ModifierInstance::new(ModifierId::new(77), Modifier::double_effect(1)),
            }]
        );
    }

    #[test]
    fn test_debuff_protection_blocks_debuff() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let lesson = with_modifiers(lesson(), vec![Modifier::debuff_protection(2)]);

        let debuff = Effect::get_modifier(Modifier::NoVitalityIncrease { duration: 3 });
        assert_eq!(
            EffectResolver::resolve(&lesson, &debuff, &mut ctx),
            vec![Diff::ModifierUpdated {
                id: ModifierId::new(1),
                field: ModifierField::Times,
                delta: -1,
            }]
        );

        // Buffs pass through untouched.
        let buff = Effect::get_modifier(Modifier::HalfLifeConsumption { duration: 2 });
        let diffs = EffectResolver::resolve(&lesson, &buff, &mut ctx);
        assert!(matches!(diffs.as_slice(), [Diff::ModifierAdded { .. }]));
    }

    #[test]
    fn test_multiply_modifier() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let lesson = with_modifiers(lesson(), vec![Modifier::focus(5)]);

        let effect = Effect::MultiplyModifier {
            kind: ModifierKind::Focus,
            percentage: 150,
        };
        // ceil(7.5) - 5
        assert_eq!(
            EffectResolver::resolve(&lesson, &effect, &mut ctx),
            vec![Diff::ModifierUpdated {
                id: ModifierId::new(1),
                field: ModifierField::Amount,
                delta: 3,
            }]
        );
    }

    #[test]
    fn test_life_effects_clamp() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let mut lesson = lesson();
        lesson.idol.life = 28;

        assert_eq!(
            EffectResolver::resolve(&lesson, &Effect::recover_life(5), &mut ctx),
            vec![Diff::Life { actual: 2, max: 5 }]
        );

        lesson.idol.life = 3;
        assert_eq!(
            EffectResolver::resolve(&lesson, &Effect::drain_life(5), &mut ctx),
            vec![Diff::Life { actual: -3, max: -5 }]
        );
    }

    #[test]
    fn test_draw_with_nearly_full_hand() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let mut lesson = lesson();
        lesson.piles.deck = ids(&[10, 11, 12]);
        lesson.piles.hand = ids(&[1, 2, 3, 4]);

        let diffs = EffectResolver::resolve(&lesson, &Effect::draw(2), &mut ctx);
        let after = patch(&lesson, &diffs);
        assert_eq!(diffs.len(), 1);
        assert_eq!(after.piles.hand, ids(&[1, 2, 3, 4, 10]));
        assert_eq!(after.piles.discard, ids(&[11]));
    }

    #[test]
    fn test_draw_from_empty_piles_is_silent() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        assert!(EffectResolver::resolve(&lesson(), &Effect::draw(3), &mut ctx).is_empty());
    }

    #[test]
    fn test_exchange_hand() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let mut lesson = lesson();
        lesson.piles.deck = ids(&[10, 11, 12]);
        lesson.piles.hand = ids(&[1, 2]);

        let after = patch(&lesson, &EffectResolver::resolve(&lesson, &Effect::ExchangeHand, &mut ctx));
        assert_eq!(after.piles.hand, ids(&[10, 11]));
        assert_eq!(after.piles.discard, ids(&[1, 2]));
        assert_eq!(after.piles.deck, ids(&[12]));
    }

    #[test]
    fn test_enhance_hand() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let mut lesson = lesson();
        assert!(EffectResolver::resolve(&lesson, &Effect::EnhanceHand, &mut ctx).is_empty());

        lesson.piles.hand = ids(&[4, 7]);
        lesson.piles.deck = ids(&[9]);
        let diffs = EffectResolver::resolve(&lesson, &Effect::EnhanceHand, &mut ctx);
        assert_eq!(
            diffs,
            vec![Diff::CardsEnhanced {
                card_ids: vec![CardInstanceId::new(4), CardInstanceId::new(7)],
                source: EnhancementSource::Lesson,
            }]
        );
    }

    #[test]
    fn test_generate_card() {
        let mut store = Registry::new();
        store.register_generatable_card(CardDefinition::new(
            CardId::new(5),
            "Generated",
            CardCategory::Active,
            CardContent::new(Cost::normal(1)),
        ));
        let mut ctx = EngineContext::new(&store, || 0.3, || 40);
        let lesson = lesson();

        let after = patch(&lesson, &EffectResolver::resolve(&lesson, &Effect::GenerateCard, &mut ctx));
        let card = &after.cards[&CardInstanceId::new(40)];
        assert_eq!(card.card_id, CardId::new(5));
        assert!(card.has_enhancement_from(EnhancementSource::Lesson));
        assert_eq!(after.piles.hand, ids(&[40]));
    }

    #[test]
    fn test_conditions_read_the_given_snapshot() {
        let store = Registry::new();
        let mut ctx = EngineContext::seeded(&store, 1);
        let before = lesson();
        let now = with_modifiers(lesson(), vec![Modifier::good_condition(1)]);

        let effect = Effect::score(5).when(Condition::HasGoodCondition);
        assert_eq!(EffectResolver::resolve_if(&now, &before, &effect, &mut ctx), None);
        assert_eq!(
            EffectResolver::resolve_if(&before, &now, &effect, &mut ctx),
            Some(vec![Diff::Score { actual: 5, max: 5 }])
        );
    }

    #[test]
    fn test_reactive_modifier_is_appended() {
        let store = Registry::new();
        let mut ctx = EngineContext::new(&store, || 0.0, || 3);
        let reactive = Modifier::reactive(2, TriggerDeclaration::turn_end(), Effect::score(1));
        let diffs = EffectResolver::resolve(&lesson(), &Effect::get_modifier(reactive.clone()), &mut ctx);
        assert_eq!(
            diffs,
            vec![Diff::ModifierAdded {
                instance: ModifierInstance::new(ModifierId::new(3), reactive),
            }]
        );
    }
}
