//! Diff/patch protocol.
//!
//! Every state change the engine makes is a [`Diff`]. Orchestration wraps
//! each diff in a [`LessonUpdate`] tagged with its cause, so a history can be
//! displayed, filtered by reason, or replayed with [`patch_updates`].
//!
//! ```
//! use lesson_engine::core::{LessonConfig, TurnTrack};
//! use lesson_engine::diff::{patch, Diff};
//! use lesson_engine::lesson::Lesson;
//!
//! let lesson = Lesson::empty(&LessonConfig::new(vec![TurnTrack::Vocal]));
//! let next = patch(&lesson, &[Diff::Score { actual: 9, max: 9 }]);
//!
//! assert_eq!(lesson.score, 0);
//! assert_eq!(next.score, 9);
//! ```

mod patch;
mod update;

pub use patch::{apply_diff, patch, patch_updates};
pub use update::{Diff, LessonUpdate, ReasonKind, UpdateReason};
