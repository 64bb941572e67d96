//! Results of orchestration calls.

use crate::diff::{apply_diff, Diff, LessonUpdate, ReasonKind, UpdateReason};

use super::state::Lesson;

/// The lesson after an orchestration call and the updates that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonOutcome {
    pub lesson: Lesson,
    pub updates: Vec<LessonUpdate>,
}

impl LessonOutcome {
    /// The bare diffs, in order.
    pub fn diffs(&self) -> impl Iterator<Item = &Diff> {
        self.updates.iter().map(|u| &u.diff)
    }
}

/// Working copy of a lesson that records every diff landed on it.
///
/// Each step of an orchestration reads the working lesson, resolves diffs
/// against it and commits them before the next step runs.
pub(crate) struct Transaction {
    lesson: Lesson,
    updates: Vec<LessonUpdate>,
}

impl Transaction {
    pub(crate) fn new(lesson: &Lesson) -> Self {
        Self {
            lesson: lesson.clone(),
            updates: Vec::new(),
        }
    }

    pub(crate) fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    /// Reason tagged with the working lesson's current turn number.
    pub(crate) fn reason(&self, kind: ReasonKind) -> UpdateReason {
        UpdateReason::new(kind, self.lesson.turn_number)
    }

    /// Land `diffs` in order and record them under `kind`.
    pub(crate) fn commit(&mut self, kind: ReasonKind, diffs: impl IntoIterator<Item = Diff>) {
        let reason = self.reason(kind);
        for diff in diffs {
            apply_diff(&mut self.lesson, &diff);
            self.updates.push(LessonUpdate::new(diff, reason));
        }
    }

    pub(crate) fn finish(self) -> LessonOutcome {
        LessonOutcome {
            lesson: self.lesson,
            updates: self.updates,
        }
    }
}
