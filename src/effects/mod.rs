//! Effects, conditions, costs and their resolution.
//!
//! ## Key Types
//!
//! - [`Effect`]: atomic game effects (perform, draw, acquire modifier, ...)
//! - [`Condition`]: predicates over a lesson snapshot
//! - [`Cost`]: what a card or item costs, and the arithmetic around it
//! - [`EffectResolver`]: turns an effect into ordered diffs
//!
//! ## Example
//!
//! ```
//! use lesson_engine::cards::Registry;
//! use lesson_engine::core::{EngineContext, LessonConfig, TurnTrack};
//! use lesson_engine::diff::Diff;
//! use lesson_engine::effects::{Effect, EffectResolver};
//! use lesson_engine::lesson::Lesson;
//!
//! let store = Registry::new();
//! let mut ctx = EngineContext::seeded(&store, 7);
//! let lesson = Lesson::empty(&LessonConfig::new(vec![TurnTrack::Vocal]));
//!
//! let diffs = EffectResolver::resolve(&lesson, &Effect::score(9), &mut ctx);
//! assert_eq!(diffs, vec![Diff::Score { actual: 9, max: 9 }]);
//! ```

mod condition;
mod cost;
mod effect;
pub mod formula;
mod resolver;

pub use condition::{Comparator, Condition, ConditionEvaluator, MeasureBasis};
pub use cost::{can_afford, consume, effective_cost, Cost, CostKind};
pub use effect::{Effect, EffectCategory, LeverageTarget, ScoreGain, VitalityGain, VitalityReduction};
pub use resolver::EffectResolver;
