//! Replayable lesson session.
//!
//! A `LessonSession` owns the lesson as it was built, the committed lesson,
//! and every update committed since. Folding the history over the initial
//! lesson must always give back the committed lesson.

use im::Vector;

use crate::core::{CardInstanceId, EngineContext, LessonConfig, LessonResult};
use crate::diff::{patch_updates, LessonUpdate};

use super::orchestrator;
use super::outcome::LessonOutcome;
use super::state::Lesson;

/// A lesson with its full history.
#[derive(Clone, Debug)]
pub struct LessonSession {
    initial: Lesson,
    lesson: Lesson,
    history: Vector<LessonUpdate>,
}

impl LessonSession {
    /// Start a session from an already built lesson.
    #[must_use]
    pub fn new(lesson: Lesson) -> Self {
        Self {
            initial: lesson.clone(),
            lesson,
            history: Vector::new(),
        }
    }

    /// Build the lesson from `config` and start a session on it.
    pub fn from_config(config: &LessonConfig, ctx: &mut EngineContext) -> LessonResult<Self> {
        Ok(Self::new(Lesson::new(config, ctx)?))
    }

    /// The committed lesson.
    #[must_use]
    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    /// The lesson as it was before any update.
    #[must_use]
    pub fn initial(&self) -> &Lesson {
        &self.initial
    }

    #[must_use]
    pub fn history(&self) -> &Vector<LessonUpdate> {
        &self.history
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.lesson.is_ended()
    }

    pub fn start_lesson(&mut self, ctx: &mut EngineContext) -> LessonResult<Vec<LessonUpdate>> {
        let outcome = orchestrator::start_lesson(&self.lesson, ctx)?;
        Ok(self.commit(outcome))
    }

    pub fn start_turn(&mut self, ctx: &mut EngineContext) -> LessonResult<Vec<LessonUpdate>> {
        let outcome = orchestrator::start_turn(&self.lesson, ctx)?;
        Ok(self.commit(outcome))
    }

    pub fn use_card(&mut self, card: CardInstanceId, ctx: &mut EngineContext) -> LessonResult<Vec<LessonUpdate>> {
        let outcome = orchestrator::use_card(&self.lesson, card, ctx)?;
        Ok(self.commit(outcome))
    }

    pub fn end_turn(&mut self, ctx: &mut EngineContext) -> LessonResult<Vec<LessonUpdate>> {
        let outcome = orchestrator::end_turn(&self.lesson, ctx)?;
        Ok(self.commit(outcome))
    }

    pub fn skip_turn(&mut self, ctx: &mut EngineContext) -> LessonResult<Vec<LessonUpdate>> {
        let outcome = orchestrator::skip_turn(&self.lesson, ctx)?;
        Ok(self.commit(outcome))
    }

    /// Predict a card use. Never touches the session.
    pub fn preview_card_use(&self, card: CardInstanceId, ctx: &mut EngineContext) -> LessonResult<LessonOutcome> {
        orchestrator::preview_card_use(&self.lesson, card, ctx)
    }

    #[must_use]
    pub fn can_use_card(&self, card: CardInstanceId, ctx: &EngineContext) -> bool {
        orchestrator::can_use_card(&self.lesson, card, ctx)
    }

    /// Re-fold the whole history over the initial lesson.
    #[must_use]
    pub fn replay(&self) -> Lesson {
        patch_updates(&self.initial, self.history.iter())
    }

    fn commit(&mut self, outcome: LessonOutcome) -> Vec<LessonUpdate> {
        self.lesson = outcome.lesson;
        self.history.extend(outcome.updates.iter().cloned());
        outcome.updates
    }
}
