//! # lesson-engine
//!
//! Rules engine for turn-based resource-management card lessons.
//!
//! Given a deck of skill cards, a loadout of producer items and a sequence of
//! turns, the engine resolves card use, timed triggers and resource
//! arithmetic into an ordered list of diffs.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: randomness and id generation are injected through
//!    [`EngineContext`]. Same lesson, same context, same diffs.
//!
//! 2. **Diffs, not mutation**: every operation returns the next lesson plus
//!    the tagged updates that produced it. [`patch`] folds diffs over a
//!    lesson; a session's history replays to its committed lesson.
//!
//! 3. **Cheap branching**: lessons use `im` persistent collections, so a
//!    preview or a search branch is an O(1) clone.
//!
//! ## Modules
//!
//! - `core`: ids, RNG, injected context, configuration, errors
//! - `cards`: card definitions, instances, definition store
//! - `items`: producer items
//! - `modifiers`: modifier vocabulary
//! - `effects`: effects, conditions, costs, formulas, resolver
//! - `triggers`: trigger declarations and matching
//! - `diff`: diffs, causality tags, patch reducer
//! - `zones`: card piles
//! - `lesson`: lesson state, orchestration, sessions
//!
//! ## Example
//!
//! ```
//! use lesson_engine::{
//!     CardCategory, CardContent, CardDefinition, CardId, Cost, Effect, EngineContext,
//!     LessonConfig, LessonSession, Registry, TurnTrack,
//! };
//!
//! let mut store = Registry::new();
//! store.register_card(CardDefinition::new(
//!     CardId::new(1),
//!     "Appeal Basics",
//!     CardCategory::Active,
//!     CardContent::new(Cost::normal(4)).with_effect(Effect::score(9)),
//! ));
//!
//! let config = LessonConfig::new(vec![TurnTrack::Vocal; 2])
//!     .with_clear_score(20)
//!     .with_card(CardId::new(1), false);
//!
//! let mut ctx = EngineContext::seeded(&store, 42);
//! let mut session = LessonSession::from_config(&config, &mut ctx).unwrap();
//! session.start_lesson(&mut ctx).unwrap();
//! session.start_turn(&mut ctx).unwrap();
//!
//! let card = session.lesson().piles.hand[0];
//! session.use_card(card, &mut ctx).unwrap();
//!
//! assert_eq!(session.lesson().score, 9);
//! assert_eq!(session.replay(), *session.lesson());
//! ```

pub mod core;
pub mod zones;
pub mod cards;
pub mod items;
pub mod modifiers;
pub mod effects;
pub mod triggers;
pub mod diff;
pub mod lesson;

// Re-export commonly used types
pub use crate::core::{
    CardId, CardInstanceId, ItemId, ItemInstanceId, ModifierId,
    GameRng, EngineContext,
    LessonConfig, ScoreThresholds, TrackValues, TurnTrack, HAND_CAPACITY,
    LessonError, LessonResult,
};

pub use crate::zones::{PileChange, Piles};

pub use crate::cards::{
    CardCategory, CardContent, CardDefinition, CardInstance, DefinitionStore,
    EnhancementSource, Registry,
};

pub use crate::items::{ItemContent, ItemDefinition, ProducerItem};

pub use crate::modifiers::{Modifier, ModifierInstance, ModifierKind};

pub use crate::effects::{
    Condition, ConditionEvaluator, Cost, CostKind, Effect, EffectResolver, ScoreGain,
    VitalityGain,
};

pub use crate::triggers::{TriggerDeclaration, TriggerKind, TriggerQuery, TriggerValidator};

pub use crate::diff::{patch, patch_updates, Diff, LessonUpdate, ReasonKind, UpdateReason};

pub use crate::lesson::{Idol, Lesson, LessonOutcome, LessonSession};
