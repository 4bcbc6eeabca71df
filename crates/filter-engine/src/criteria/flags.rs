//! Criteria over the boolean question flags: top liked, top interviewed,
//! saved, and the "hide solved" switch.

use crate::traits::Criterion;
use question_store::{Question, QuestionFlag};

/// Keeps questions whose `flag` equals `expected`.
pub struct FlagCriterion {
    flag: QuestionFlag,
    expected: bool,
    name: String,
}

impl FlagCriterion {
    pub fn new(flag: QuestionFlag, expected: bool) -> Self {
        let name = if expected {
            format!("FlagCriterion({})", flag.name())
        } else {
            format!("FlagCriterion(!{})", flag.name())
        };
        Self { flag, expected, name }
    }

    pub fn top_liked() -> Self {
        Self::new(QuestionFlag::TopLiked, true)
    }

    pub fn top_interviewed() -> Self {
        Self::new(QuestionFlag::TopInterview, true)
    }

    pub fn saved() -> Self {
        Self::new(QuestionFlag::Saved, true)
    }

    /// The global "hide solved questions" clause.
    pub fn unsolved() -> Self {
        Self::new(QuestionFlag::Solved, false)
    }
}

impl Criterion for FlagCriterion {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, question: &Question) -> bool {
        question.flag(self.flag) == self.expected
    }
}
