//! Producer item and reactive modifier activation.
//!
//! Both walk their list in order, skip anything whose trigger does not match
//! the query, and stop as soon as the perfect score is reached.

use tracing::trace;

use crate::core::{EngineContext, LessonResult};
use crate::diff::{Diff, ReasonKind};
use crate::effects::{can_afford, consume, effective_cost, ConditionEvaluator, EffectResolver};
use crate::modifiers::{find_modifier_by_id, Modifier, ModifierField};
use crate::triggers::{TriggerEvent, TriggerQuery, TriggerValidator};

use super::outcome::Transaction;

/// Query for `event` on the working lesson's current track.
pub(crate) fn trigger_query(tx: &Transaction, event: TriggerEvent) -> TriggerQuery {
    TriggerQuery::new(event, tx.lesson().current_track())
}

/// Activate every producer item matching `query`, in item order.
///
/// An item activates only if its trigger matches, its activation budget is
/// not spent, its condition holds and its cost is affordable.
pub(crate) fn activate_items(tx: &mut Transaction, ctx: &mut EngineContext, query: &TriggerQuery) -> LessonResult<()> {
    let item_ids: Vec<_> = tx.lesson().idol.items.iter().map(|item| item.id).collect();

    for item_id in item_ids {
        if tx.lesson().is_perfect() {
            break;
        }
        let Some(item) = tx.lesson().idol.items.iter().find(|i| i.id == item_id).cloned() else {
            continue;
        };
        let content = ctx.item(item.item_id)?.content(item.enhanced);

        if !TriggerValidator::matches(&content.trigger, query) || !item.has_budget(content.times) {
            continue;
        }
        if let Some(condition) = &content.condition {
            if !ConditionEvaluator::evaluate(tx.lesson(), condition) {
                continue;
            }
        }

        let reason = ReasonKind::ItemActivation { item: item_id };
        if let Some(cost) = &content.cost {
            let cost = effective_cost(cost, &tx.lesson().idol);
            if !can_afford(&tx.lesson().idol, &cost) {
                continue;
            }
            let diffs = consume(&tx.lesson().idol, &cost);
            tx.commit(reason, diffs);
        }

        trace!(item = %item_id, definition = %item.item_id, "item activated");

        let snapshot = tx.lesson().clone();
        for effect in &content.effects {
            if let Some(diffs) = EffectResolver::resolve_if(tx.lesson(), &snapshot, effect, ctx) {
                tx.commit(reason, diffs);
            }
        }

        tx.commit(
            reason,
            [Diff::ItemActivationCount {
                item: item_id,
                count: item.activation_count + 1,
            }],
        );
    }

    Ok(())
}

/// Fire every held reactive modifier matching `query`, in acquisition order.
///
/// Each firing spends one of the modifier's remaining times.
pub(crate) fn activate_reactive_modifiers(tx: &mut Transaction, ctx: &mut EngineContext, query: &TriggerQuery) {
    let modifier_ids: Vec<_> = tx
        .lesson()
        .idol
        .modifiers
        .iter()
        .filter(|m| matches!(m.modifier, Modifier::ReactiveEffect { .. }))
        .map(|m| m.id)
        .collect();

    for modifier_id in modifier_ids {
        if tx.lesson().is_perfect() {
            break;
        }
        let Some(held) = find_modifier_by_id(&tx.lesson().idol.modifiers, modifier_id) else {
            continue;
        };
        let Modifier::ReactiveEffect { trigger, effect, .. } = &held.modifier else {
            continue;
        };
        if !TriggerValidator::matches(trigger, query) {
            continue;
        }
        let effect = effect.as_ref().clone();
        let last_use = held.value() <= 1;

        trace!(modifier = %modifier_id, "reactive modifier fired");

        let reason = ReasonKind::ModifierActivation { modifier: modifier_id };
        let snapshot = tx.lesson().clone();
        if let Some(diffs) = EffectResolver::resolve_if(tx.lesson(), &snapshot, &effect, ctx) {
            tx.commit(reason, diffs);
        }
        let spent = if last_use {
            Diff::ModifierRemoved { id: modifier_id }
        } else {
            Diff::ModifierUpdated {
                id: modifier_id,
                field: ModifierField::Times,
                delta: -1,
            }
        };
        tx.commit(reason, [spent]);
    }
}
