//! Effect and usage conditions.
//!
//! Conditions are pure predicates over a lesson snapshot. Effect conditions
//! are evaluated against the snapshot taken before the action started, so an
//! earlier effect of the same card never changes whether a later one fires.

use serde::{Deserialize, Serialize};

use crate::lesson::Lesson;
use crate::modifiers::{has_modifier, modifier_value, ModifierKind};

/// What a measured-value condition compares against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureBasis {
    /// Current life as a percentage of max life.
    Life,
    /// Score as a percentage of the clear threshold.
    ScoreProgress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    AtLeast,
    AtMost,
}

impl Comparator {
    #[must_use]
    pub fn holds(self, measured: i64, threshold: i64) -> bool {
        match self {
            Self::AtLeast => measured >= threshold,
            Self::AtMost => measured <= threshold,
        }
    }
}

/// A condition on the lesson state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// The held modifier of `kind` has at least `min` in its numeric field.
    CountModifier { kind: ModifierKind, min: i32 },

    /// At most `max` turns remain, counting the current one (1 = final turn).
    CountRemainingTurns { max: i32 },

    /// Vitality within `[min, max]`.
    VitalityInRange { min: i32, max: i32 },

    /// Good condition is held, whatever its duration.
    HasGoodCondition,

    /// Life is at least 50% of max life.
    LifeAtLeastHalf,

    /// Measured percentage of `basis` compared against `percentage`.
    MeasureValue {
        basis: MeasureBasis,
        comparator: Comparator,
        percentage: u32,
    },
}

/// Evaluator for conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition holds on `lesson`.
    #[must_use]
    pub fn evaluate(lesson: &Lesson, condition: &Condition) -> bool {
        let idol = &lesson.idol;
        match condition {
            Condition::CountModifier { kind, min } => modifier_value(&idol.modifiers, *kind) >= *min,

            Condition::CountRemainingTurns { max } => lesson.remaining_turns() <= *max,

            Condition::VitalityInRange { min, max } => (*min..=*max).contains(&idol.vitality),

            Condition::HasGoodCondition => has_modifier(&idol.modifiers, ModifierKind::GoodCondition),

            Condition::LifeAtLeastHalf => floor_percentage(idol.life, idol.max_life) >= 50,

            Condition::MeasureValue {
                basis,
                comparator,
                percentage,
            } => {
                let measured = match basis {
                    MeasureBasis::Life => floor_percentage(idol.life, idol.max_life),
                    MeasureBasis::ScoreProgress => match lesson.score_thresholds {
                        Some(thresholds) => floor_percentage(lesson.score, thresholds.clear),
                        // Progress without a clear threshold is undefined; the
                        // condition is treated as satisfied.
                        None => return true,
                    },
                };
                comparator.holds(measured, i64::from(*percentage))
            }
        }
    }
}

/// `floor(value × 100 / basis)`, 0 for a non-positive basis.
fn floor_percentage(value: i32, basis: i32) -> i64 {
    if basis <= 0 {
        return 0;
    }
    (i64::from(value) * 100).div_euclid(i64::from(basis))
}
