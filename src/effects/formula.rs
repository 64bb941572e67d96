//! Score and vitality formulas.
//!
//! All arithmetic is integral. Score is computed in hundredths, multiplied
//! by the condition multiplier in tenths and the mighty performance
//! multiplier in percent, then divided once with an exact ceiling.

use crate::lesson::Lesson;
use crate::modifiers::{has_modifier, modifier_value, ModifierKind, MIGHTY_PERFORMANCE_PERCENT};

use super::effect::{ScoreGain, VitalityGain};

/// `ceil(numerator / denominator)` for a positive denominator.
#[must_use]
pub fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    debug_assert!(denominator > 0);
    -(-numerator).div_euclid(denominator)
}

/// `ceil(value × percentage / 100)`.
#[must_use]
pub fn ceil_percent(value: i32, percentage: u32) -> i32 {
    saturate(ceil_div(i64::from(value) * i64::from(percentage), 100))
}

pub(crate) fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Condition multiplier in tenths: 10 without good condition, 15 with it,
/// plus the good condition duration when excellent condition is also held.
#[must_use]
pub fn condition_multiplier_tenths(lesson: &Lesson) -> i64 {
    let modifiers = &lesson.idol.modifiers;
    let good_condition = has_modifier(modifiers, ModifierKind::GoodCondition);
    let base = if good_condition { 15 } else { 10 };
    let excellent = if has_modifier(modifiers, ModifierKind::ExcellentCondition) {
        i64::from(modifier_value(modifiers, ModifierKind::GoodCondition))
    } else {
        0
    };
    base + excellent
}

/// Score of one repetition of `gain`, before the perfect-score clamp.
#[must_use]
pub fn calculate_score(lesson: &Lesson, gain: &ScoreGain) -> i32 {
    let modifiers = &lesson.idol.modifiers;
    let focus = i64::from(modifier_value(modifiers, ModifierKind::Focus));
    let focus_percent = i64::from(gain.focus_multiplier_percent.unwrap_or(100));
    let cards_used = i64::from(lesson.idol.total_cards_used);

    let hundredths = i64::from(gain.value) * 100
        + focus * focus_percent
        + i64::from(gain.boost_per_card_used) * cards_used * 100;

    let mighty = if has_modifier(modifiers, ModifierKind::MightyPerformance) {
        MIGHTY_PERFORMANCE_PERCENT
    } else {
        100
    };

    let mut score = ceil_div(
        hundredths * condition_multiplier_tenths(lesson) * mighty,
        100 * 10 * 100,
    );

    if let Some(bonus) = lesson.score_bonus_percent() {
        score = ceil_div(score * i64::from(bonus), 100);
    }

    saturate(score)
}

/// Vitality granted by `gain`.
#[must_use]
pub fn calculate_vitality(lesson: &Lesson, gain: &VitalityGain) -> i32 {
    let modifiers = &lesson.idol.modifiers;
    if has_modifier(modifiers, ModifierKind::NoVitalityIncrease) {
        return 0;
    }
    if gain.fixed {
        return gain.value;
    }

    let motivation = i64::from(modifier_value(modifiers, ModifierKind::Motivation));
    let motivation_percent = i64::from(gain.motivation_multiplier_percent.unwrap_or(100));
    let cards_used = i64::from(lesson.idol.total_cards_used);

    let hundredths = i64::from(gain.value) * 100
        + motivation * motivation_percent
        + i64::from(gain.boost_per_card_used) * cards_used * 100;

    saturate(ceil_div(hundredths, 100))
}
