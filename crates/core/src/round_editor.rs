//! Insert/remove/update operations on the nested `rounds[].questions[]`
//! collection of an [`ExperienceSubmission`].
//!
//! Every operation is synchronous and leaves the aggregate satisfying its
//! invariants (at least one round, at least one question per round, dense
//! 1-based round numbers). Attempts that would break an invariant are
//! rejected with an [`EditWarning`] and leave the aggregate unchanged.

use crate::experience::{
    normalize_rounds, ExperienceSubmission, InterviewQuestion, InterviewRound, QuestionEdit,
    RoundEdit,
};

/// Result of a collection edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Rejected(EditWarning),
}

impl EditOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn warning(self) -> Option<EditWarning> {
        match self {
            Self::Applied => None,
            Self::Rejected(w) => Some(w),
        }
    }
}

/// User-visible reason an edit was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EditWarning {
    #[error("At least one round is required")]
    LastRoundRequired,

    #[error("At least one question is required in each round")]
    LastQuestionRequired,

    #[error("Round {index} does not exist")]
    RoundOutOfRange { index: usize },

    #[error("Question {question_index} does not exist in round {round_index}")]
    QuestionOutOfRange {
        round_index: usize,
        question_index: usize,
    },
}

fn reject(warning: EditWarning) -> EditOutcome {
    tracing::warn!(%warning, "Rejected experience form edit");
    EditOutcome::Rejected(warning)
}

impl ExperienceSubmission {
    /// Resize the round list to `n` rounds.
    ///
    /// Growing appends blank rounds numbered by position. Shrinking keeps the
    /// first `n` rounds and drops everything entered in the rest. A count of
    /// zero is treated as one.
    pub fn set_total_rounds(&mut self, n: usize) -> EditOutcome {
        let n = n.max(1);
        if n > self.rounds.len() {
            let start = self.rounds.len() + 1;
            self.rounds
                .extend((start..=n).map(|number| InterviewRound::new(number as u32)));
        } else {
            self.rounds.truncate(n);
        }
        EditOutcome::Applied
    }

    /// Append one blank round.
    pub fn add_round(&mut self) -> EditOutcome {
        let number = self.rounds.len() as u32 + 1;
        self.rounds.push(InterviewRound::new(number));
        EditOutcome::Applied
    }

    /// Remove the round at `index` and renumber the survivors `1..=n`.
    pub fn remove_round(&mut self, index: usize) -> EditOutcome {
        if self.rounds.len() <= 1 {
            return reject(EditWarning::LastRoundRequired);
        }
        if index >= self.rounds.len() {
            return reject(EditWarning::RoundOutOfRange { index });
        }
        self.rounds.remove(index);
        normalize_rounds(&mut self.rounds);
        EditOutcome::Applied
    }

    /// Replace one field of one round.
    pub fn update_round(&mut self, index: usize, edit: RoundEdit) -> EditOutcome {
        match self.rounds.get_mut(index) {
            Some(round) => {
                round.apply(edit);
                EditOutcome::Applied
            }
            None => reject(EditWarning::RoundOutOfRange { index }),
        }
    }

    /// Append one blank question to a round.
    pub fn add_question(&mut self, round_index: usize) -> EditOutcome {
        match self.rounds.get_mut(round_index) {
            Some(round) => {
                round.questions.push(InterviewQuestion::default());
                EditOutcome::Applied
            }
            None => reject(EditWarning::RoundOutOfRange { index: round_index }),
        }
    }

    /// Remove one question from a round, keeping at least one.
    pub fn remove_question(&mut self, round_index: usize, question_index: usize) -> EditOutcome {
        let Some(round) = self.rounds.get_mut(round_index) else {
            return reject(EditWarning::RoundOutOfRange { index: round_index });
        };
        if round.questions.len() <= 1 {
            return reject(EditWarning::LastQuestionRequired);
        }
        if question_index >= round.questions.len() {
            return reject(EditWarning::QuestionOutOfRange {
                round_index,
                question_index,
            });
        }
        round.questions.remove(question_index);
        EditOutcome::Applied
    }

    /// Replace one field of one question.
    pub fn update_question(
        &mut self,
        round_index: usize,
        question_index: usize,
        edit: QuestionEdit,
    ) -> EditOutcome {
        let Some(round) = self.rounds.get_mut(round_index) else {
            return reject(EditWarning::RoundOutOfRange { index: round_index });
        };
        match round.questions.get_mut(question_index) {
            Some(question) => {
                question.apply(edit);
                EditOutcome::Applied
            }
            None => reject(EditWarning::QuestionOutOfRange {
                round_index,
                question_index,
            }),
        }
    }
}
