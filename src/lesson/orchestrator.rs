//! Turn and card-use orchestration.
//!
//! The lesson moves through
//! `LessonStart → TurnStart → (CardUse)* → TurnEnd → TurnStart | LessonEnd`.
//! Each function here takes the committed lesson by reference and returns a
//! [`LessonOutcome`]: the next lesson plus every tagged update, in the order
//! the updates landed. Nothing is mutated in place, so a caller may keep the
//! old lesson as a branch point.

use smallvec::SmallVec;
use tracing::debug;

use crate::cards::{CardContent, CardDefinition, EnhancementSource};
use crate::core::{CardInstanceId, EngineContext, LessonError, LessonResult};
use crate::diff::{Diff, ReasonKind};
use crate::effects::{
    can_afford, consume, effective_cost, ConditionEvaluator, Effect, EffectCategory, EffectResolver, ScoreGain,
};
use crate::modifiers::{find_modifier, find_modifier_by_id, modifier_value, Modifier, ModifierField, ModifierKind};
use crate::triggers::TriggerEvent;

use super::activation::{activate_items, activate_reactive_modifiers, trigger_query};
use super::outcome::{LessonOutcome, Transaction};
use super::state::Lesson;

/// Life recovered by skipping a turn.
pub const SKIP_TURN_LIFE_RECOVERY: i32 = 2;

/// Roll memory effects, then fire lesson-start items.
///
/// Runs once, before the first turn.
pub fn start_lesson(lesson: &Lesson, ctx: &mut EngineContext) -> LessonResult<LessonOutcome> {
    if lesson.is_ended() {
        return Err(LessonError::LessonEnded);
    }
    if lesson.started {
        return Err(LessonError::LessonAlreadyStarted);
    }
    let mut tx = Transaction::new(lesson);
    tx.commit(ReasonKind::LessonStart, [Diff::LessonStarted]);

    for memory in lesson.memory_effects.iter() {
        let roll = ctx.random() * 100.0;
        if roll < f64::from(memory.chance_percent) {
            let diffs = EffectResolver::resolve(tx.lesson(), &memory.effect, ctx);
            tx.commit(ReasonKind::MemoryEffect, diffs);
        }
    }

    let query = trigger_query(&tx, TriggerEvent::LessonStart);
    activate_items(&mut tx, ctx, &query)?;

    debug!(score = tx.lesson().score, "lesson started");
    Ok(tx.finish())
}

/// Start the next turn.
///
/// Only valid after [`start_lesson`] or after the previous turn was ended
/// with [`end_turn`].
pub fn start_turn(lesson: &Lesson, ctx: &mut EngineContext) -> LessonResult<LessonOutcome> {
    if lesson.is_ended() {
        return Err(LessonError::LessonEnded);
    }
    if !lesson.started {
        return Err(LessonError::LessonNotStarted);
    }
    if lesson.is_turn_in_progress() {
        return Err(LessonError::TurnInProgress(lesson.turn_number));
    }
    let mut tx = Transaction::new(lesson);

    let mut bookkeeping = vec![Diff::TurnNumberIncreased];
    if lesson.turn_ended {
        bookkeeping.push(Diff::TurnEnded { ended: false });
    }
    if lesson.idol.action_points != 1 {
        bookkeeping.push(Diff::ActionPoints {
            delta: 1 - lesson.idol.action_points,
        });
    }
    tx.commit(ReasonKind::TurnStart, bookkeeping);
    let turn_number = tx.lesson().turn_number;

    if turn_number == 1 {
        move_innate_cards_to_deck_front(&mut tx, ctx)?;
    }
    strip_support_enhancements(&mut tx);
    draw_turn_hand(&mut tx, ctx);
    roll_support_enhancements(&mut tx, ctx);

    for encouragement in lesson.encouragements.iter().filter(|e| e.turn_number == turn_number) {
        let diffs = EffectResolver::resolve(tx.lesson(), &encouragement.effect, ctx);
        tx.commit(ReasonKind::Encouragement, diffs);
    }

    let query = trigger_query(&tx, TriggerEvent::TurnStart { turn_number });
    activate_items(&mut tx, ctx, &query)?;

    fire_delayed_effects(&mut tx, ctx);

    let ids = tx.lesson().idol.modifiers.iter().map(|m| m.id).collect();
    tx.commit(ReasonKind::TurnStart, [Diff::ModifiersCaptured { ids }]);

    debug!(
        turn = turn_number,
        track = ?tx.lesson().current_track(),
        hand = tx.lesson().piles.hand.len(),
        "turn started"
    );
    Ok(tx.finish())
}

fn move_innate_cards_to_deck_front(tx: &mut Transaction, ctx: &EngineContext) -> LessonResult<()> {
    let lesson = tx.lesson();
    let mut innate = Vec::new();
    for id in lesson.piles.deck.iter().copied() {
        if lesson.card_content(id, ctx)?.innate {
            innate.push(id);
        }
    }
    if innate.is_empty() {
        return Ok(());
    }

    let mut piles = lesson.piles.clone();
    piles.move_to_deck_front(&innate);
    let change = lesson.piles.change_to(&piles);
    tx.commit(ReasonKind::TurnStart, change.map(Diff::CardPiles));
    Ok(())
}

fn strip_support_enhancements(tx: &mut Transaction) {
    let card_ids: Vec<_> = tx
        .lesson()
        .cards
        .values()
        .filter(|card| card.has_enhancement_from(EnhancementSource::LessonSupport))
        .map(|card| card.id)
        .collect();
    if card_ids.is_empty() {
        return;
    }
    tx.commit(
        ReasonKind::TurnStart,
        [Diff::CardEnhancementsRemoved {
            card_ids,
            source: EnhancementSource::LessonSupport,
        }],
    );
}

fn draw_turn_hand(tx: &mut Transaction, ctx: &mut EngineContext) {
    let lesson = tx.lesson();
    let mut piles = lesson.piles.clone();
    piles.draw(lesson.turn_draw, || ctx.random());
    let change = lesson.piles.change_to(&piles);
    tx.commit(ReasonKind::TurnStart, change.map(Diff::CardPiles));
}

/// Each unenhanced card in hand may gain a turn-local enhancement.
fn roll_support_enhancements(tx: &mut Transaction, ctx: &mut EngineContext) {
    let lesson = tx.lesson();
    let percent = lesson.support_enhancement_percent;
    if percent == 0 {
        return;
    }

    let mut card_ids = Vec::new();
    for id in lesson.piles.hand.iter().copied() {
        let unenhanced = lesson.card(id).is_some_and(|card| !card.is_enhanced());
        if unenhanced && ctx.random() * 100.0 < f64::from(percent) {
            card_ids.push(id);
        }
    }
    if card_ids.is_empty() {
        return;
    }
    tx.commit(
        ReasonKind::TurnStart,
        [Diff::CardsEnhanced {
            card_ids,
            source: EnhancementSource::LessonSupport,
        }],
    );
}

/// Fire delayed effects whose delay has run out, in three passes by category.
///
/// Each pass stops at the perfect score. The draw and hand-enhance passes
/// are skipped entirely when the perfect score was already reached.
fn fire_delayed_effects(tx: &mut Transaction, ctx: &mut EngineContext) {
    let due: Vec<_> = tx
        .lesson()
        .idol
        .modifiers
        .iter()
        .filter_map(|m| match &m.modifier {
            Modifier::DelayedEffect { duration: 1, effect } => Some((m.id, effect.as_ref().clone())),
            _ => None,
        })
        .collect();
    if due.is_empty() {
        return;
    }

    for category in [EffectCategory::Score, EffectCategory::Draw, EffectCategory::EnhanceHand] {
        if category != EffectCategory::Score && tx.lesson().is_perfect() {
            continue;
        }
        for (modifier_id, effect) in due.iter().filter(|(_, e)| e.category() == category) {
            if tx.lesson().is_perfect() {
                break;
            }
            let diffs = EffectResolver::resolve(tx.lesson(), effect, ctx);
            tx.commit(ReasonKind::DelayedEffect { modifier: *modifier_id }, diffs);
        }
    }
}

/// Whether a card in hand can be used right now.
#[must_use]
pub fn can_use_card(lesson: &Lesson, card: CardInstanceId, ctx: &EngineContext) -> bool {
    check_usable(lesson, card, ctx).is_ok()
}

/// Contract checks for using a card outside preview.
fn check_usable<'s>(
    lesson: &Lesson,
    card: CardInstanceId,
    ctx: &EngineContext<'s>,
) -> LessonResult<(&'s CardDefinition, &'s CardContent)> {
    if lesson.is_ended() {
        return Err(LessonError::LessonEnded);
    }
    if !lesson.is_turn_in_progress() {
        return Err(LessonError::TurnNotInProgress);
    }
    let (definition, content) = card_in_hand(lesson, card, ctx)?;

    if let Some(condition) = &content.condition {
        if !ConditionEvaluator::evaluate(lesson, condition) {
            return Err(LessonError::ConditionNotMet(card));
        }
    }
    let cost = effective_cost(&content.cost, &lesson.idol);
    if !can_afford(&lesson.idol, &cost) {
        return Err(LessonError::CostUnaffordable(card));
    }
    let has_extra_use = modifier_value(&lesson.idol.modifiers, ModifierKind::AdditionalCardUsageCount) > 0;
    if lesson.idol.action_points <= 0 && !has_extra_use {
        return Err(LessonError::NoActionPoints(card));
    }
    Ok((definition, content))
}

fn card_in_hand<'s>(
    lesson: &Lesson,
    card: CardInstanceId,
    ctx: &EngineContext<'s>,
) -> LessonResult<(&'s CardDefinition, &'s CardContent)> {
    if !lesson.piles.in_hand(card) {
        return Err(LessonError::CardNotInHand(card));
    }
    let instance = lesson.card(card).ok_or(LessonError::UnknownCardInstance(card))?;
    let definition = ctx.card(instance.card_id)?;
    Ok((definition, definition.content(instance.is_enhanced())))
}

/// Use a card from hand.
///
/// Fails without touching anything if the card is not in hand, its
/// condition or cost fails, or no action point or extra use is left.
pub fn use_card(lesson: &Lesson, card: CardInstanceId, ctx: &mut EngineContext) -> LessonResult<LessonOutcome> {
    let (definition, content) = check_usable(lesson, card, ctx)?;
    let outcome = run_card_use(lesson, card, definition, content, ctx, false)?;
    debug!(
        card = %card,
        definition = %definition.id,
        updates = outcome.updates.len(),
        score = outcome.lesson.score,
        "card used"
    );
    Ok(outcome)
}

/// Predict the outcome of using a card without committing anything.
///
/// Condition, cost and action-point gates are bypassed. Pile effects and
/// every item or reactive trigger are skipped, so the same lesson and the
/// same context always give the same prediction.
pub fn preview_card_use(
    lesson: &Lesson,
    card: CardInstanceId,
    ctx: &mut EngineContext,
) -> LessonResult<LessonOutcome> {
    let (definition, content) = card_in_hand(lesson, card, ctx)?;
    run_card_use(lesson, card, definition, content, ctx, true)
}

fn run_card_use(
    lesson: &Lesson,
    card: CardInstanceId,
    definition: &CardDefinition,
    content: &CardContent,
    ctx: &mut EngineContext,
    preview: bool,
) -> LessonResult<LessonOutcome> {
    let mut tx = Transaction::new(lesson);
    let use_reason = ReasonKind::CardUse { card };
    let double_effect = find_modifier(&lesson.idol.modifiers, ModifierKind::DoubleEffect).map(|m| m.id);

    // Pay with an extra use first, an action point otherwise.
    let usage = match find_modifier(&lesson.idol.modifiers, ModifierKind::AdditionalCardUsageCount) {
        Some(extra) => Some(Diff::ModifierUpdated {
            id: extra.id,
            field: ModifierField::Amount,
            delta: -1,
        }),
        None if lesson.idol.action_points > 0 => Some(Diff::ActionPoints { delta: -1 }),
        None => None,
    };
    tx.commit(use_reason, usage);

    let mut piles = lesson.piles.clone();
    piles.play(card, content.used_once);
    let change = lesson.piles.change_to(&piles);
    tx.commit(use_reason, change.map(Diff::CardPiles));

    let cost = effective_cost(&content.cost, &tx.lesson().idol);
    let payment = consume(&tx.lesson().idol, &cost);
    tx.commit(use_reason, payment);
    tx.commit(use_reason, [Diff::CardsUsed { delta: 1 }]);

    let mut passes = 1;
    if let Some(id) = double_effect {
        tx.commit(
            use_reason,
            [Diff::ModifierUpdated {
                id,
                field: ModifierField::Times,
                delta: -1,
            }],
        );
        passes = 2;
    }

    for _ in 0..passes {
        run_effect_pass(&mut tx, card, definition, content, ctx, preview)?;
    }

    // An extra use left over with no action point refunds the point.
    let after = tx.lesson();
    if after.idol.action_points == 0 {
        if let Some(extra) = find_modifier(&after.idol.modifiers, ModifierKind::AdditionalCardUsageCount) {
            let refund = [
                Diff::ActionPoints { delta: 1 },
                Diff::ModifierUpdated {
                    id: extra.id,
                    field: ModifierField::Amount,
                    delta: -1,
                },
            ];
            tx.commit(use_reason, refund);
        }
    }

    Ok(tx.finish())
}

/// One resolution of a card's effects with the triggers around it.
fn run_effect_pass(
    tx: &mut Transaction,
    card: CardInstanceId,
    definition: &CardDefinition,
    content: &CardContent,
    ctx: &mut EngineContext,
    preview: bool,
) -> LessonResult<()> {
    let before = tx.lesson().clone();
    let category = definition.category;
    let card_id = definition.id;

    if !preview {
        let query = trigger_query(tx, TriggerEvent::BeforeCardEffectActivation { category, card_id });
        activate_items(tx, ctx, &query)?;
        activate_reactive_modifiers(tx, ctx, &query);

        let total = tx.lesson().idol.total_cards_used;
        let query = trigger_query(tx, TriggerEvent::CardUsed { total });
        activate_items(tx, ctx, &query)?;
    }

    let snapshot = tx.lesson().clone();
    for effect in &content.effects {
        if preview && effect.affects_card_piles() {
            continue;
        }
        if let Some(diffs) = EffectResolver::resolve_if(tx.lesson(), &snapshot, effect, ctx) {
            tx.commit(ReasonKind::CardEffect { card }, diffs);
        }
    }

    if preview {
        return Ok(());
    }

    let increased = increased_modifiers(&before, tx.lesson());
    let vitality_increased = tx.lesson().idol.vitality > before.idol.vitality;
    let query = trigger_query(
        tx,
        TriggerEvent::AfterCardEffectActivation {
            category,
            card_id,
            vitality_increased,
            increased_modifiers: increased,
        },
    );
    activate_items(tx, ctx, &query)?;
    activate_reactive_modifiers(tx, ctx, &query);

    let kinds = increased_modifiers(&before, tx.lesson());
    if !kinds.is_empty() {
        let query = trigger_query(tx, TriggerEvent::ModifiersIncreased { kinds });
        activate_items(tx, ctx, &query)?;
    }

    if tx.lesson().idol.life < before.idol.life {
        let query = trigger_query(tx, TriggerEvent::LifeDecreased);
        activate_items(tx, ctx, &query)?;
    }
    Ok(())
}

/// Modifier kinds whose held value is higher in `after` than in `before`.
fn increased_modifiers(before: &Lesson, after: &Lesson) -> SmallVec<[ModifierKind; 4]> {
    let mut kinds = SmallVec::new();
    for held in after.idol.modifiers.iter() {
        let kind = held.kind();
        if kinds.contains(&kind) {
            continue;
        }
        let previous = find_modifier_by_id(&before.idol.modifiers, held.id).map_or(0, |m| m.value());
        if held.value() > previous {
            kinds.push(kind);
        }
    }
    kinds
}

/// End the current turn.
pub fn end_turn(lesson: &Lesson, ctx: &mut EngineContext) -> LessonResult<LessonOutcome> {
    if !lesson.is_turn_in_progress() {
        return Err(LessonError::TurnNotInProgress);
    }
    let mut tx = Transaction::new(lesson);

    let query = trigger_query(&tx, TriggerEvent::TurnEnd);
    activate_items(&mut tx, ctx, &query)?;
    activate_reactive_modifiers(&mut tx, ctx, &query);

    let impression = modifier_value(&tx.lesson().idol.modifiers, ModifierKind::PositiveImpression);
    if impression > 0 {
        let effect = Effect::perform(Some(ScoreGain::new(impression)), None);
        let diffs = EffectResolver::resolve(tx.lesson(), &effect, ctx);
        tx.commit(ReasonKind::TurnEnd, diffs);
    }

    let decay: Vec<_> = tx
        .lesson()
        .idol
        .turn_start_modifier_ids
        .iter()
        .filter_map(|id| find_modifier_by_id(&tx.lesson().idol.modifiers, *id))
        .filter(|held| held.kind().decays_over_time())
        .map(|held| {
            if held.value() <= 1 {
                Diff::ModifierRemoved { id: held.id }
            } else {
                Diff::ModifierUpdated {
                    id: held.id,
                    field: held.modifier.field(),
                    delta: -1,
                }
            }
        })
        .collect();
    tx.commit(ReasonKind::DurationDecay, decay);

    let mut piles = tx.lesson().piles.clone();
    piles.discard_hand();
    let change = tx.lesson().piles.change_to(&piles);
    tx.commit(ReasonKind::TurnEnd, change.map(Diff::CardPiles));
    tx.commit(ReasonKind::TurnEnd, [Diff::TurnEnded { ended: true }]);

    debug!(
        turn = tx.lesson().turn_number,
        score = tx.lesson().score,
        ended = tx.lesson().is_ended(),
        "turn ended"
    );
    Ok(tx.finish())
}

/// Skip using cards this turn: recover life and give up the action points.
///
/// The turn still has to be ended with [`end_turn`].
pub fn skip_turn(lesson: &Lesson, ctx: &mut EngineContext) -> LessonResult<LessonOutcome> {
    if lesson.is_ended() {
        return Err(LessonError::LessonEnded);
    }
    if !lesson.is_turn_in_progress() {
        return Err(LessonError::TurnNotInProgress);
    }
    let mut tx = Transaction::new(lesson);

    let diffs = EffectResolver::resolve(tx.lesson(), &Effect::recover_life(SKIP_TURN_LIFE_RECOVERY), ctx);
    tx.commit(ReasonKind::TurnSkip, diffs);
    if lesson.idol.action_points != 0 {
        tx.commit(
            ReasonKind::TurnSkip,
            [Diff::ActionPoints {
                delta: -lesson.idol.action_points,
            }],
        );
    }

    debug!(turn = lesson.turn_number, "turn skipped");
    Ok(tx.finish())
}
