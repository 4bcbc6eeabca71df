//! Core trait for question criteria.
//!
//! A criterion is one clause of a filter: the derivation engine ANDs the
//! criteria of a [`CriteriaSet`](crate::CriteriaSet) together.

use question_store::Question;

/// A single predicate over questions.
///
/// ## Design Note
/// - `Send + Sync` lets a criterion be evaluated from the store's parallel count
/// - Matching is total: a criterion never fails, it only says yes or no
pub trait Criterion: Send + Sync {
    /// Returns the name of this criterion (for logging/debugging)
    fn name(&self) -> &str;

    fn matches(&self, question: &Question) -> bool;

    /// Keep only the questions this criterion matches, preserving order.
    fn apply(&self, questions: Vec<Question>) -> Vec<Question> {
        questions
            .into_iter()
            .filter(|question| self.matches(question))
            .collect()
    }
}
