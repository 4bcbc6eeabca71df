//! List derivation: which questions a filter selects, and how many.
//!
//! `derive` and `count_problems` build the same [`CriteriaSet`], so a count
//! always equals the length of the derived list. `derive` runs the criteria
//! one after another; `count_problems` evaluates them per question without
//! cloning anything.

use crate::criteria_set::CriteriaSet;
use question_store::{Question, QuestionFilter, Repository};

/// Criteria for `filter` plus the caller's "hide solved" switch.
pub fn criteria_for(filter: &QuestionFilter, only_unsolved: bool) -> CriteriaSet {
    CriteriaSet::from_filter(filter).hide_solved(only_unsolved)
}

/// The questions matching `filter`, in question id order.
pub fn derive<R>(questions: &R, filter: &QuestionFilter, only_unsolved: bool) -> Vec<Question>
where
    R: Repository<Question> + ?Sized,
{
    let criteria = criteria_for(filter, only_unsolved);
    let derived = criteria.apply(questions.all());
    tracing::debug!("Derived {} questions", derived.len());
    derived
}

/// Number of questions matching `filter` without materializing them.
///
/// `None` means no filter at all, the same as [`QuestionFilter::empty`].
pub fn count_problems<R>(
    questions: &R,
    filter: Option<&QuestionFilter>,
    only_unsolved: bool,
) -> usize
where
    R: Repository<Question> + ?Sized,
{
    let empty = QuestionFilter::empty();
    let criteria = criteria_for(filter.unwrap_or(&empty), only_unsolved);
    questions.count(&|question: &Question| criteria.matches(question))
}
