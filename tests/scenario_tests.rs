//! Concrete resolution scenarios.
//!
//! Each test pins one arithmetic or pile rule to exact diffs.

mod common;

use common::*;
use im::Vector;

use lesson_engine::core::{CardInstanceId, EngineContext, LessonConfig, ModifierId, TurnTrack};
use lesson_engine::diff::{patch, Diff, ReasonKind};
use lesson_engine::effects::{Effect, EffectResolver, VitalityReduction};
use lesson_engine::lesson::{preview_card_use, use_card, Lesson};
use lesson_engine::modifiers::{Modifier, ModifierInstance};
use lesson_engine::zones::Piles;

fn ids(raw: &[u32]) -> Vector<CardInstanceId> {
    raw.iter().copied().map(CardInstanceId::new).collect()
}

fn holding(modifiers: Vec<Modifier>) -> Lesson {
    let mut lesson = Lesson::empty(&LessonConfig::new(vec![TurnTrack::Vocal; 3]));
    lesson.idol.modifiers = modifiers
        .into_iter()
        .enumerate()
        .map(|(i, m)| ModifierInstance::new(ModifierId::new(500 + i as u32), m))
        .collect();
    lesson
}

/// A cost-4 card scoring 9 pays from vitality first, then life.
#[test]
fn test_basic_card_use() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 1);
    let mut lesson = begin(&config(2, &[APPEAL]), &mut ctx);
    lesson.idol.vitality = 3;

    let card = hand_card(&lesson, APPEAL);
    let outcome = use_card(&lesson, card, &mut ctx).unwrap();

    let scores: Vec<_> = outcome.diffs().filter(|d| matches!(d, Diff::Score { .. })).cloned().collect();
    assert_eq!(scores, vec![Diff::Score { actual: 9, max: 9 }]);

    let payment: Vec<_> = outcome
        .updates
        .iter()
        .filter(|u| u.reason.kind == ReasonKind::CardUse { card })
        .filter(|u| matches!(u.diff, Diff::Vitality { .. } | Diff::Life { .. }))
        .map(|u| u.diff.clone())
        .collect();
    assert_eq!(
        payment,
        vec![
            Diff::Vitality { actual: -3, max: -4 },
            Diff::Life { actual: -1, max: -1 },
        ]
    );

    assert_eq!(outcome.lesson.score, 9);
    assert_eq!(outcome.lesson.idol.vitality, 0);
    assert_eq!(outcome.lesson.idol.life, 29);
    assert_eq!(outcome.lesson.piles.discard, ids(&[card.raw()]));
}

/// Leveraging vitality halves it first, then scores from the old value.
#[test]
fn test_leverage_vitality_reads_pre_reduction_value() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 1);
    let mut lesson = holding(vec![]);
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

    let after = patch(&lesson, &diffs);
    assert_eq!(after.idol.vitality, 5);
    assert_eq!(after.score, 13);
}

/// Drawing past hand capacity routes the overflow to discard.
#[test]
fn test_draw_overflow_goes_to_discard() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 1);
    let mut lesson = holding(vec![]);
    lesson.piles = Piles::with_deck(ids(&[5, 6]));
    lesson.piles.hand = ids(&[1, 2, 3, 4]);

    let diffs = EffectResolver::resolve(&lesson, &Effect::draw(2), &mut ctx);
    let after = patch(&lesson, &diffs);

    assert_eq!(after.piles.hand, ids(&[1, 2, 3, 4, 5]));
    assert_eq!(after.piles.discard, ids(&[6]));
    assert!(after.piles.deck.is_empty());
}

/// Drawing from an empty deck and discard draws nothing and is no error.
#[test]
fn test_draw_from_nothing() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 1);
    let lesson = holding(vec![]);

    let diffs = EffectResolver::resolve(&lesson, &Effect::draw(3), &mut ctx);
    assert!(diffs.is_empty());
}

#[test]
fn test_good_condition_multiplier() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 1);

    let lesson = holding(vec![Modifier::good_condition(2)]);
    assert_eq!(
        EffectResolver::resolve(&lesson, &Effect::score(10), &mut ctx),
        vec![Diff::Score { actual: 15, max: 15 }]
    );
    // 13.5 rounds up
    assert_eq!(
        EffectResolver::resolve(&lesson, &Effect::score(9), &mut ctx),
        vec![Diff::Score { actual: 14, max: 14 }]
    );

    let lesson = holding(vec![Modifier::good_condition(2), Modifier::excellent_condition(1)]);
    assert_eq!(
        EffectResolver::resolve(&lesson, &Effect::score(10), &mut ctx),
        vec![Diff::Score { actual: 17, max: 17 }]
    );
}

/// Added turns repeat the last track.
#[test]
fn test_added_turns_repeat_last_track() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 1);
    let lesson = Lesson::empty(&LessonConfig::new(vec![TurnTrack::Vocal, TurnTrack::Dance]));

    let diffs = EffectResolver::resolve(&lesson, &Effect::IncreaseRemainingTurns { amount: 1 }, &mut ctx);
    let mut after = patch(&lesson, &diffs);

    assert_eq!(
        after.effective_turns(),
        vec![TurnTrack::Vocal, TurnTrack::Dance, TurnTrack::Dance]
    );

    after.turn_number = 3;
    assert_eq!(after.current_track(), Some(TurnTrack::Dance));
    assert_eq!(after.remaining_turns(), 1);
}

/// A preview with the same collaborators predicts the same diffs and leaves
/// the committed lesson alone.
#[test]
fn test_preview_is_idempotent() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 3);
    let lesson = begin(&config(2, &[FOCUS_UP, DRAW, APPEAL]), &mut ctx);
    let committed = lesson.clone();

    for card in [FOCUS_UP, DRAW, APPEAL] {
        let card = hand_card(&lesson, card);
        let first = preview_card_use(&lesson, card, &mut EngineContext::seeded(&store, 11)).unwrap();
        let second = preview_card_use(&lesson, card, &mut EngineContext::seeded(&store, 11)).unwrap();
        assert_eq!(first, second);
    }
    assert_eq!(lesson, committed);
}

/// Preview skips pile effects: the only pile move is the card leaving hand.
#[test]
fn test_preview_skips_draw() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 3);
    let deck = [DRAW, APPEAL, APPEAL, APPEAL, APPEAL];
    let lesson = begin(&config(2, &deck), &mut ctx);
    let card = hand_card(&lesson, DRAW);

    let outcome = preview_card_use(&lesson, card, &mut ctx).unwrap();
    let pile_moves = outcome.diffs().filter(|d| matches!(d, Diff::CardPiles(_))).count();
    assert_eq!(pile_moves, 1);
    assert_eq!(outcome.lesson.piles.hand.len(), lesson.piles.hand.len() - 1);
}

/// Preview bypasses the affordability gate and reports the clamped payment.
#[test]
fn test_preview_of_unaffordable_card() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 3);
    let lesson = begin(&config(2, &[EXPENSIVE]), &mut ctx);
    let card = hand_card(&lesson, EXPENSIVE);

    assert!(use_card(&lesson, card, &mut ctx).is_err());

    let outcome = preview_card_use(&lesson, card, &mut ctx).unwrap();
    assert!(outcome
        .diffs()
        .any(|d| *d == Diff::Life { actual: -30, max: -40 }));
    assert_eq!(outcome.lesson.idol.life, 0);
}

/// Repeated acquisitions of a merging kind keep a single instance.
#[test]
fn test_merging_modifier_stays_single() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 1);
    let mut lesson = holding(vec![]);

    for amount in [2, 3, 4] {
        let diffs = EffectResolver::resolve(&lesson, &Effect::get_modifier(Modifier::focus(amount)), &mut ctx);
        lesson = patch(&lesson, &diffs);
    }

    assert_eq!(lesson.idol.modifiers.len(), 1);
    assert_eq!(lesson.idol.modifiers[0].modifier, Modifier::focus(9));
}

/// Non-merging kinds stack as independent instances.
#[test]
fn test_delayed_effects_stack() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 1);
    let mut lesson = holding(vec![]);

    for _ in 0..2 {
        let effect = Effect::get_modifier(Modifier::delayed(1, Effect::score(4)));
        let diffs = EffectResolver::resolve(&lesson, &effect, &mut ctx);
        lesson = patch(&lesson, &diffs);
    }

    assert_eq!(lesson.idol.modifiers.len(), 2);
    assert_ne!(lesson.idol.modifiers[0].id, lesson.idol.modifiers[1].id);
}

/// Debuff protection absorbs the debuff and spends a charge.
#[test]
fn test_debuff_protection_blocks() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 1);
    let lesson = holding(vec![Modifier::debuff_protection(1)]);

    let effect = Effect::get_modifier(Modifier::NoVitalityIncrease { duration: 2 });
    let after = patch(&lesson, &EffectResolver::resolve(&lesson, &effect, &mut ctx));
    assert!(after.idol.modifiers.is_empty());

    let again = patch(&after, &EffectResolver::resolve(&after, &effect, &mut ctx));
    assert_eq!(again.idol.modifiers.len(), 1);
    assert_eq!(again.idol.modifiers[0].modifier, Modifier::NoVitalityIncrease { duration: 2 });
}

/// Score never passes the perfect threshold.
#[test]
fn test_score_clamps_at_perfect() {
    let store = registry();
    let mut ctx = EngineContext::seeded(&store, 1);
    let lesson = Lesson::empty(&LessonConfig::new(vec![TurnTrack::Vocal]).with_thresholds(10, 20));
    let mut lesson = lesson;
    lesson.score = 15;

    let diffs = EffectResolver::resolve(&lesson, &Effect::score(9), &mut ctx);
    assert_eq!(diffs, vec![Diff::Score { actual: 5, max: 9 }]);
    assert!(patch(&lesson, &diffs).is_perfect());
}
