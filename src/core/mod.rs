//! Core engine types: identifiers, RNG, injected context, configuration, errors.
//!
//! Nothing in here knows about cards or modifiers beyond their ids; the
//! subsystems build on these pieces.

pub mod entity;
pub mod rng;
pub mod config;
pub mod context;
pub mod error;

pub use entity::{CardId, CardInstanceId, IdSequence, ItemId, ItemInstanceId, ModifierId};
pub use rng::{pick_index, GameRng};
pub use config::{
    DeckEntry, Encouragement, ItemLoadout, LessonConfig, MemoryEffect, ScoreThresholds,
    TrackValues, TurnTrack, HAND_CAPACITY,
};
pub use context::EngineContext;
pub use error::{LessonError, LessonResult};
