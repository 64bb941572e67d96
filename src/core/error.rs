//! Contract violations surfaced by the engine.
//!
//! Every variant is a caller bug: the presentation layer is expected to check
//! playability before asking the engine to use a card. Ordinary game outcomes
//! (empty deck, unaffordable preview, unset thresholds) are never errors.

use thiserror::Error;

use super::entity::{CardId, CardInstanceId, ItemId};

/// Errors returned by lesson construction and orchestration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LessonError {
    #[error("card definition {0} is not in the definition store")]
    UnknownCard(CardId),
    #[error("item definition {0} is not in the definition store")]
    UnknownItem(ItemId),
    #[error("card instance {0} does not exist in this lesson")]
    UnknownCardInstance(CardInstanceId),
    #[error("card {0} is not in hand")]
    CardNotInHand(CardInstanceId),
    #[error("usage condition of card {0} is not met")]
    ConditionNotMet(CardInstanceId),
    #[error("cost of card {0} cannot be paid")]
    CostUnaffordable(CardInstanceId),
    #[error("no action points left to use card {0}")]
    NoActionPoints(CardInstanceId),
    #[error("no turn is in progress")]
    TurnNotInProgress,
    #[error("turn {0} has not ended yet")]
    TurnInProgress(u32),
    #[error("the lesson has not started")]
    LessonNotStarted,
    #[error("the lesson has already started")]
    LessonAlreadyStarted,
    #[error("the lesson has already ended")]
    LessonEnded,
}

/// Result alias used across the crate.
pub type LessonResult<T> = Result<T, LessonError>;
