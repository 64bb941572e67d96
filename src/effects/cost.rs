//! Cost arithmetic.
//!
//! Three steps, kept separate so the orchestrator can run them in order:
//! 1. [`effective_cost`]: apply life-consumption modifiers
//! 2. [`can_afford`]: gate card use and item activation
//! 3. [`consume`]: produce the diffs that pay the cost
//!
//! Life-consumption modifiers only touch `Normal` and `Life` costs; costs
//! paid from a modifier are never adjusted.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::diff::Diff;
use crate::lesson::Idol;
use crate::modifiers::{find_modifier, has_modifier, modifier_value, ModifierKind};

/// Resource a cost is paid from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostKind {
    /// Vitality first, then life.
    Normal,
    /// Life only.
    Life,
    Focus,
    Motivation,
    GoodCondition,
    PositiveImpression,
}

impl CostKind {
    /// The modifier a modifier-keyed cost is paid from.
    #[must_use]
    pub const fn modifier_kind(self) -> Option<ModifierKind> {
        match self {
            Self::Normal | Self::Life => None,
            Self::Focus => Some(ModifierKind::Focus),
            Self::Motivation => Some(ModifierKind::Motivation),
            Self::GoodCondition => Some(ModifierKind::GoodCondition),
            Self::PositiveImpression => Some(ModifierKind::PositiveImpression),
        }
    }
}

/// A cost of a card or item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cost {
    pub kind: CostKind,
    pub value: i32,
}

impl Cost {
    #[must_use]
    pub const fn new(kind: CostKind, value: i32) -> Self {
        Self { kind, value }
    }

    #[must_use]
    pub const fn normal(value: i32) -> Self {
        Self::new(CostKind::Normal, value)
    }

    #[must_use]
    pub const fn life(value: i32) -> Self {
        Self::new(CostKind::Life, value)
    }

    #[must_use]
    pub const fn free() -> Self {
        Self::normal(0)
    }
}

/// Cost after life-consumption modifiers.
///
/// The flat reduction is applied first (floored at zero), then the rate:
/// ×2 with double consumption, ÷2 rounded up with half consumption, ×1 when
/// both are held.
#[must_use]
pub fn effective_cost(cost: &Cost, idol: &Idol) -> Cost {
    if cost.kind.modifier_kind().is_some() {
        return *cost;
    }

    let modifiers = &idol.modifiers;
    let reduction = modifier_value(modifiers, ModifierKind::LifeConsumptionReduction);
    let reduced = (cost.value - reduction).max(0);

    let doubled = has_modifier(modifiers, ModifierKind::DoubleLifeConsumption);
    let halved = has_modifier(modifiers, ModifierKind::HalfLifeConsumption);
    let value = match (doubled, halved) {
        (true, false) => reduced * 2,
        (false, true) => (reduced + 1) / 2,
        _ => reduced,
    };

    Cost::new(cost.kind, value)
}

/// Whether `idol` can pay `cost` in full.
#[must_use]
pub fn can_afford(idol: &Idol, cost: &Cost) -> bool {
    let available = match cost.kind.modifier_kind() {
        Some(kind) => modifier_value(&idol.modifiers, kind),
        None if cost.kind == CostKind::Life => idol.life,
        None => idol.vitality + idol.life,
    };
    available >= cost.value
}

/// Diffs paying `cost`.
///
/// Each resource diff reports the clamped `actual` and the nominal `max`, so
/// a preview of an unaffordable card still shows what would be asked. A
/// modifier-keyed cost whose modifier is not held produces no diff at all.
#[must_use]
pub fn consume(idol: &Idol, cost: &Cost) -> SmallVec<[Diff; 2]> {
    if cost.value <= 0 {
        return SmallVec::new();
    }

    match cost.kind {
        CostKind::Normal => {
            let mut diffs = SmallVec::new();
            let from_vitality = idol.vitality.clamp(0, cost.value);
            if from_vitality > 0 {
                diffs.push(Diff::Vitality {
                    actual: -from_vitality,
                    max: -cost.value,
                });
            }
            let remaining = cost.value - from_vitality;
            if remaining > 0 {
                diffs.push(Diff::Life {
                    actual: -idol.life.clamp(0, remaining),
                    max: -remaining,
                });
            }
            diffs
        }
        CostKind::Life => smallvec![Diff::Life {
            actual: -idol.life.clamp(0, cost.value),
            max: -cost.value,
        }],
        CostKind::Focus | CostKind::Motivation | CostKind::GoodCondition | CostKind::PositiveImpression => {
            let Some(kind) = cost.kind.modifier_kind() else {
                return SmallVec::new();
            };
            match find_modifier(&idol.modifiers, kind) {
                Some(held) => smallvec![Diff::ModifierUpdated {
                    id: held.id,
                    field: held.modifier.field(),
                    delta: -held.value().clamp(0, cost.value),
                }],
                None => SmallVec::new(),
            }
        }
    }
}
