//! The lesson aggregate and its orchestration.
//!
//! ## Key Types
//!
//! - [`Lesson`] / [`Idol`]: the state of one play-through
//! - [`LessonOutcome`]: next lesson plus the tagged updates of one call
//! - [`LessonSession`]: committed lesson with replayable history
//!
//! ## Operations
//!
//! - [`start_lesson`]: memory effects, lesson-start items
//! - [`start_turn`]: draw, encouragement, turn-start items, delayed effects
//! - [`use_card`] / [`preview_card_use`]: card use, committed or predicted
//! - [`end_turn`]: turn-end triggers, positive impression, decay
//! - [`skip_turn`]: recover life instead of using cards

mod activation;
mod orchestrator;
mod outcome;
mod session;
mod state;

pub use orchestrator::{
    can_use_card, end_turn, preview_card_use, skip_turn, start_lesson, start_turn, use_card,
    SKIP_TURN_LIFE_RECOVERY,
};
pub use outcome::LessonOutcome;
pub use session::LessonSession;
pub use state::{Idol, Lesson};
