//! Effect definitions.
//!
//! Effects are the atomic actions of cards, items, encouragements and
//! queued modifiers. They describe intent only; the resolver turns an effect
//! into diffs against a concrete lesson snapshot.

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use crate::modifiers::{Modifier, ModifierKind};

/// Score part of a perform effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreGain {
    pub value: i32,

    /// Repetitions; one score diff per repetition.
    #[serde(default = "one")]
    pub times: u32,

    /// Focus is counted at this percentage. `None` = 100%.
    #[serde(default)]
    pub focus_multiplier_percent: Option<u32>,

    /// Added once per card used so far this lesson.
    #[serde(default)]
    pub boost_per_card_used: i32,
}

/// Vitality part of a perform effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalityGain {
    pub value: i32,

    #[serde(default)]
    pub boost_per_card_used: i32,

    /// Motivation is counted at this percentage. `None` = 100%.
    #[serde(default)]
    pub motivation_multiplier_percent: Option<u32>,

    /// Bypass every bonus and gain exactly `value`.
    #[serde(default)]
    pub fixed: bool,
}

fn one() -> u32 {
    1
}

impl ScoreGain {
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self {
            value,
            times: 1,
            focus_multiplier_percent: None,
            boost_per_card_used: 0,
        }
    }

    #[must_use]
    pub fn times(mut self, times: u32) -> Self {
        self.times = times;
        self
    }

    #[must_use]
    pub fn focus_multiplier(mut self, percent: u32) -> Self {
        self.focus_multiplier_percent = Some(percent);
        self
    }

    #[must_use]
    pub fn boost_per_card_used(mut self, boost: i32) -> Self {
        self.boost_per_card_used = boost;
        self
    }
}

impl VitalityGain {
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self {
            value,
            boost_per_card_used: 0,
            motivation_multiplier_percent: None,
            fixed: false,
        }
    }

    #[must_use]
    pub fn fixed(value: i32) -> Self {
        Self {
            fixed: true,
            ..Self::new(value)
        }
    }

    #[must_use]
    pub fn boost_per_card_used(mut self, boost: i32) -> Self {
        self.boost_per_card_used = boost;
        self
    }

    #[must_use]
    pub fn motivation_multiplier(mut self, percent: u32) -> Self {
        self.motivation_multiplier_percent = Some(percent);
        self
    }
}

/// What a leverage effect converts into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeverageTarget {
    Score,
    Vitality,
}

/// How a vitality leverage effect spends the vitality it reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VitalityReduction {
    /// Halve current vitality, rounding the remainder down.
    Halve,
    /// Drop current vitality to zero.
    Zero,
}

/// Grouping used when queued effects fire at turn start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectCategory {
    /// Everything that is not a draw or hand enhancement.
    Score,
    Draw,
    EnhanceHand,
}

/// An atomic game effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Lose life, clamped at zero.
    DrainLife { value: i32 },

    /// Draw cards into hand; overflow goes to discard.
    DrawCards { amount: u32 },

    /// Add one lesson enhancement to every card in hand.
    EnhanceHand,

    /// Discard the hand and draw the same number of cards.
    ExchangeHand,

    /// Put a random enhanced generatable card into hand.
    GenerateCard,

    /// Extend the lesson by `amount` turns.
    IncreaseRemainingTurns { amount: i32 },

    /// Acquire a modifier (merge, append, or blocked by debuff protection).
    GetModifier { modifier: Modifier },

    /// Scale the held modifier of `kind` to `percentage`%, rounded up.
    MultiplyModifier { kind: ModifierKind, percentage: u32 },

    /// Gain score and/or vitality.
    Perform {
        #[serde(default)]
        score: Option<ScoreGain>,
        #[serde(default)]
        vitality: Option<VitalityGain>,
    },

    /// Convert `percentage`% of a held modifier into score or vitality.
    PerformLeveragingModifier {
        kind: ModifierKind,
        percentage: u32,
        target: LeverageTarget,
    },

    /// Convert `percentage`% of current vitality into score.
    PerformLeveragingVitality {
        percentage: u32,
        #[serde(default)]
        reduction: Option<VitalityReduction>,
    },

    /// Gain life, clamped at max life.
    RecoverLife { value: i32 },

    /// Resolve `effect` only if `condition` holds on the pre-action snapshot.
    Conditional {
        condition: Condition,
        effect: Box<Effect>,
    },
}

impl Effect {
    /// Create a single-hit score effect.
    pub fn score(value: i32) -> Self {
        Self::Perform {
            score: Some(ScoreGain::new(value)),
            vitality: None,
        }
    }

    /// Create a vitality effect.
    pub fn vitality(value: i32) -> Self {
        Self::Perform {
            score: None,
            vitality: Some(VitalityGain::new(value)),
        }
    }

    /// Create a perform effect from its parts.
    pub fn perform(score: Option<ScoreGain>, vitality: Option<VitalityGain>) -> Self {
        Self::Perform { score, vitality }
    }

    pub fn draw(amount: u32) -> Self {
        Self::DrawCards { amount }
    }

    pub fn recover_life(value: i32) -> Self {
        Self::RecoverLife { value }
    }

    pub fn drain_life(value: i32) -> Self {
        Self::DrainLife { value }
    }

    pub fn get_modifier(modifier: Modifier) -> Self {
        Self::GetModifier { modifier }
    }

    pub fn leverage_vitality(percentage: u32, reduction: Option<VitalityReduction>) -> Self {
        Self::PerformLeveragingVitality {
            percentage,
            reduction,
        }
    }

    pub fn leverage_modifier(kind: ModifierKind, percentage: u32, target: LeverageTarget) -> Self {
        Self::PerformLeveragingModifier {
            kind,
            percentage,
            target,
        }
    }

    /// Wrap this effect in a condition.
    #[must_use]
    pub fn when(self, condition: Condition) -> Self {
        Self::Conditional {
            condition,
            effect: Box::new(self),
        }
    }

    /// The effect with any condition wrappers peeled off.
    #[must_use]
    pub fn unconditional(&self) -> &Effect {
        match self {
            Self::Conditional { effect, .. } => effect.unconditional(),
            other => other,
        }
    }

    /// Effects that move or create cards. Previews skip them.
    #[must_use]
    pub fn affects_card_piles(&self) -> bool {
        matches!(
            self.unconditional(),
            Self::DrawCards { .. } | Self::EnhanceHand | Self::ExchangeHand | Self::GenerateCard
        )
    }

    #[must_use]
    pub fn category(&self) -> EffectCategory {
        match self.unconditional() {
            Self::DrawCards { .. } => EffectCategory::Draw,
            Self::EnhanceHand => EffectCategory::EnhanceHand,
            _ => EffectCategory::Score,
        }
    }
}
