//! Reactive triggers.
//!
//! Producer items and reactive modifiers declare when they fire. During
//! resolution the orchestrator builds a [`TriggerQuery`] describing what just
//! happened, and [`TriggerValidator::matches`] decides, as a pure AND over
//! every filter, whether a declaration fires.
//!
//! ## Key Components
//!
//! - [`TriggerDeclaration`]: event kind plus optional turn-track scope
//! - [`TriggerKind`]: the event kinds and their card / increase / interval filters
//! - [`TriggerQuery`]: what just happened, on which track
//! - [`TriggerValidator`]: the matcher
//!
//! ## Example Usage
//!
//! ```
//! use lesson_engine::core::TurnTrack;
//! use lesson_engine::triggers::{TriggerDeclaration, TriggerEvent, TriggerQuery, TriggerValidator};
//!
//! let every_other_turn = TriggerDeclaration::every_n_turns(2).on_track(TurnTrack::Vocal);
//! let query = TriggerQuery::new(TriggerEvent::TurnStart { turn_number: 4 }, Some(TurnTrack::Vocal));
//!
//! assert!(TriggerValidator::matches(&every_other_turn, &query));
//! ```

mod declaration;
mod event;
mod validator;

pub use declaration::{IncreaseFilter, TriggerDeclaration, TriggerKind};
pub use event::{TriggerEvent, TriggerQuery};
pub use validator::TriggerValidator;
