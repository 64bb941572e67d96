//! Modifier definitions.
//!
//! A modifier is a status effect held by the idol. Every variant carries
//! exactly one numeric field (`amount`, `duration`, `value` or `times`); the
//! compiler keeps every match over the variants exhaustive.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::ModifierId;
use crate::effects::Effect;
use crate::triggers::TriggerDeclaration;

/// Score multiplier granted by mighty performance, in percent.
pub const MIGHTY_PERFORMANCE_PERCENT: i64 = 150;

/// Discriminant of a [`Modifier`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    Focus,
    GoodCondition,
    ExcellentCondition,
    Motivation,
    PositiveImpression,
    DoubleLifeConsumption,
    HalfLifeConsumption,
    LifeConsumptionReduction,
    NoVitalityIncrease,
    DebuffProtection,
    AdditionalCardUsageCount,
    MightyPerformance,
    DelayedEffect,
    DoubleEffect,
    ReactiveEffect,
}

impl ModifierKind {
    /// Merging kinds exist at most once; new acquisitions add to the held
    /// instance. Non-merging kinds always append an independent instance.
    #[must_use]
    pub const fn is_merging(self) -> bool {
        !matches!(
            self,
            Self::DelayedEffect | Self::DoubleEffect | Self::ReactiveEffect
        )
    }

    /// Kinds blocked by debuff protection.
    #[must_use]
    pub const fn is_debuff(self) -> bool {
        matches!(self, Self::DoubleLifeConsumption | Self::NoVitalityIncrease)
    }

    /// The numeric field this kind carries.
    #[must_use]
    pub const fn field(self) -> ModifierField {
        match self {
            Self::Focus
            | Self::Motivation
            | Self::PositiveImpression
            | Self::AdditionalCardUsageCount => ModifierField::Amount,
            Self::GoodCondition
            | Self::ExcellentCondition
            | Self::DoubleLifeConsumption
            | Self::HalfLifeConsumption
            | Self::NoVitalityIncrease
            | Self::MightyPerformance
            | Self::DelayedEffect => ModifierField::Duration,
            Self::LifeConsumptionReduction => ModifierField::Value,
            Self::DebuffProtection | Self::DoubleEffect | Self::ReactiveEffect => {
                ModifierField::Times
            }
        }
    }

    /// Whether the held value shrinks by one at the end of every turn.
    ///
    /// All `duration` kinds decay. Positive impression is the only `amount`
    /// kind that decays.
    #[must_use]
    pub const fn decays_over_time(self) -> bool {
        match self.field() {
            ModifierField::Duration => true,
            _ => matches!(self, Self::PositiveImpression),
        }
    }
}

/// Name of the numeric field a modifier carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierField {
    Amount,
    Duration,
    Value,
    Times,
}

/// A status effect held by the idol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    /// Adds `amount × focus multiplier` to every score gain.
    Focus { amount: i32 },
    /// Score gains ×1.5 while held.
    GoodCondition { duration: i32 },
    /// Adds 0.1 × good condition duration to the good condition multiplier.
    ExcellentCondition { duration: i32 },
    /// Adds `amount` to every vitality gain.
    Motivation { amount: i32 },
    /// Scores `amount` at every turn end; decays by one per turn.
    PositiveImpression { amount: i32 },
    /// Life costs ×2.
    DoubleLifeConsumption { duration: i32 },
    /// Life costs ÷2, rounded up.
    HalfLifeConsumption { duration: i32 },
    /// Flat reduction applied to life costs before rate modifiers.
    LifeConsumptionReduction { value: i32 },
    /// Vitality gains are forced to zero.
    NoVitalityIncrease { duration: i32 },
    /// Each charge blocks one incoming debuff.
    DebuffProtection { times: i32 },
    /// Extra card uses this turn.
    AdditionalCardUsageCount { amount: i32 },
    /// Score gains ×1.5 while held.
    MightyPerformance { duration: i32 },
    /// Fires `effect` at the turn start where `duration` is 1.
    DelayedEffect { duration: i32, effect: Box<Effect> },
    /// The next card resolves its effects twice.
    DoubleEffect { times: i32 },
    /// Fires `effect` whenever `trigger` matches, `times` more times.
    ReactiveEffect {
        times: i32,
        trigger: TriggerDeclaration,
        effect: Box<Effect>,
    },
}

impl Modifier {
    pub fn focus(amount: i32) -> Self {
        Self::Focus { amount }
    }

    pub fn good_condition(duration: i32) -> Self {
        Self::GoodCondition { duration }
    }

    pub fn excellent_condition(duration: i32) -> Self {
        Self::ExcellentCondition { duration }
    }

    pub fn motivation(amount: i32) -> Self {
        Self::Motivation { amount }
    }

    pub fn positive_impression(amount: i32) -> Self {
        Self::PositiveImpression { amount }
    }

    pub fn debuff_protection(times: i32) -> Self {
        Self::DebuffProtection { times }
    }

    pub fn double_effect(times: i32) -> Self {
        Self::DoubleEffect { times }
    }

    /// Create a delayed effect firing `delay` turn starts from now.
    pub fn delayed(delay: i32, effect: Effect) -> Self {
        Self::DelayedEffect {
            duration: delay,
            effect: Box::new(effect),
        }
    }

    /// Create a reactive effect usable `times` times.
    pub fn reactive(times: i32, trigger: TriggerDeclaration, effect: Effect) -> Self {
        Self::ReactiveEffect {
            times,
            trigger,
            effect: Box::new(effect),
        }
    }

    /// The kind discriminant.
    #[must_use]
    pub fn kind(&self) -> ModifierKind {
        match self {
            Self::Focus { .. } => ModifierKind::Focus,
            Self::GoodCondition { .. } => ModifierKind::GoodCondition,
            Self::ExcellentCondition { .. } => ModifierKind::ExcellentCondition,
            Self::Motivation { .. } => ModifierKind::Motivation,
            Self::PositiveImpression { .. } => ModifierKind::PositiveImpression,
            Self::DoubleLifeConsumption { .. } => ModifierKind::DoubleLifeConsumption,
            Self::HalfLifeConsumption { .. } => ModifierKind::HalfLifeConsumption,
            Self::LifeConsumptionReduction { .. } => ModifierKind::LifeConsumptionReduction,
            Self::NoVitalityIncrease { .. } => ModifierKind::NoVitalityIncrease,
            Self::DebuffProtection { .. } => ModifierKind::DebuffProtection,
            Self::AdditionalCardUsageCount { .. } => ModifierKind::AdditionalCardUsageCount,
            Self::MightyPerformance { .. } => ModifierKind::MightyPerformance,
            Self::DelayedEffect { .. } => ModifierKind::DelayedEffect,
            Self::DoubleEffect { .. } => ModifierKind::DoubleEffect,
            Self::ReactiveEffect { .. } => ModifierKind::ReactiveEffect,
        }
    }

    /// The single numeric field, whatever it is called for this kind.
    #[must_use]
    pub fn value(&self) -> i32 {
        match self {
            Self::Focus { amount }
            | Self::Motivation { amount }
            | Self::PositiveImpression { amount }
            | Self::AdditionalCardUsageCount { amount } => *amount,
            Self::GoodCondition { duration }
            | Self::ExcellentCondition { duration }
            | Self::DoubleLifeConsumption { duration }
            | Self::HalfLifeConsumption { duration }
            | Self::NoVitalityIncrease { duration }
            | Self::MightyPerformance { duration }
            | Self::DelayedEffect { duration, .. } => *duration,
            Self::LifeConsumptionReduction { value } => *value,
            Self::DebuffProtection { times }
            | Self::DoubleEffect { times }
            | Self::ReactiveEffect { times, .. } => *times,
        }
    }

    /// Copy of this modifier with its numeric field replaced.
    #[must_use]
    pub fn with_value(&self, new_value: i32) -> Self {
        let mut next = self.clone();
        match &mut next {
            Self::Focus { amount }
            | Self::Motivation { amount }
            | Self::PositiveImpression { amount }
            | Self::AdditionalCardUsageCount { amount } => *amount = new_value,
            Self::GoodCondition { duration }
            | Self::ExcellentCondition { duration }
            | Self::DoubleLifeConsumption { duration }
            | Self::HalfLifeConsumption { duration }
            | Self::NoVitalityIncrease { duration }
            | Self::MightyPerformance { duration }
            | Self::DelayedEffect { duration, .. } => *duration = new_value,
            Self::LifeConsumptionReduction { value } => *value = new_value,
            Self::DebuffProtection { times }
            | Self::DoubleEffect { times }
            | Self::ReactiveEffect { times, .. } => *times = new_value,
        }
        next
    }

    #[must_use]
    pub fn field(&self) -> ModifierField {
        self.kind().field()
    }

    #[must_use]
    pub fn is_merging(&self) -> bool {
        self.kind().is_merging()
    }

    #[must_use]
    pub fn is_debuff(&self) -> bool {
        self.kind().is_debuff()
    }
}

/// A modifier held by the idol, identified for later updates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierInstance {
    pub id: ModifierId,
    pub modifier: Modifier,
}

impl ModifierInstance {
    #[must_use]
    pub fn new(id: ModifierId, modifier: Modifier) -> Self {
        Self { id, modifier }
    }

    #[must_use]
    pub fn kind(&self) -> ModifierKind {
        self.modifier.kind()
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.modifier.value()
    }
}

/// First held instance of `kind`, in acquisition order.
#[must_use]
pub fn find_modifier(modifiers: &Vector<ModifierInstance>, kind: ModifierKind) -> Option<&ModifierInstance> {
    modifiers.iter().find(|m| m.kind() == kind)
}

/// Held instance with the given id.
#[must_use]
pub fn find_modifier_by_id(modifiers: &Vector<ModifierInstance>, id: ModifierId) -> Option<&ModifierInstance> {
    modifiers.iter().find(|m| m.id == id)
}

/// Numeric field of the held instance of `kind`, or 0 when absent.
#[must_use]
pub fn modifier_value(modifiers: &Vector<ModifierInstance>, kind: ModifierKind) -> i32 {
    find_modifier(modifiers, kind).map_or(0, ModifierInstance::value)
}

#[must_use]
pub fn has_modifier(modifiers: &Vector<ModifierInstance>, kind: ModifierKind) -> bool {
    find_modifier(modifiers, kind).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Effect;

    #[test]
    fn test_kind_classification() {
        assert!(ModifierKind::Focus.is_merging());
        assert!(ModifierKind::GoodCondition.is_merging());
        assert!(!ModifierKind::DelayedEffect.is_merging());
        assert!(!ModifierKind::DoubleEffect.is_merging());
        assert!(!ModifierKind::ReactiveEffect.is_merging());

        assert!(ModifierKind::NoVitalityIncrease.is_debuff());
        assert!(ModifierKind::DoubleLifeConsumption.is_debuff());
        assert!(!ModifierKind::HalfLifeConsumption.is_debuff());
    }

    #[test]
    fn test_decay_classification() {
        assert!(ModifierKind::GoodCondition.decays_over_time());
        assert!(ModifierKind::DelayedEffect.decays_over_time());
        assert!(ModifierKind::PositiveImpression.decays_over_time());
        assert!(!ModifierKind::Focus.decays_over_time());
        assert!(!ModifierKind::Motivation.decays_over_time());
        assert!(!ModifierKind::DebuffProtection.decays_over_time());
        assert!(!ModifierKind::LifeConsumptionReduction.decays_over_time());
    }

    #[test]
    fn test_value_and_with_value() {
        let focus = Modifier::focus(3);
        assert_eq!(focus.value(), 3);
        assert_eq!(focus.field(), ModifierField::Amount);
        assert_eq!(focus.with_value(8), Modifier::focus(8));

        let delayed = Modifier::delayed(2, Effect::draw(1));
        assert_eq!(delayed.value(), 2);
        assert_eq!(delayed.with_value(1), Modifier::delayed(1, Effect::draw(1)));
    }

    #[test]
    fn test_list_accessors() {
        let list: Vector<ModifierInstance> = vec![
            ModifierInstance::new(ModifierId::new(1), Modifier::focus(2)),
            ModifierInstance::new(ModifierId::new(2), Modifier::good_condition(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(modifier_value(&list, ModifierKind::Focus), 2);
        assert_eq!(modifier_value(&list, ModifierKind::Motivation), 0);
        assert!(has_modifier(&list, ModifierKind::GoodCondition));
        assert_eq!(
            find_modifier_by_id(&list, ModifierId::new(2)).map(ModifierInstance::kind),
            Some(ModifierKind::GoodCondition)
        );
    }
}
