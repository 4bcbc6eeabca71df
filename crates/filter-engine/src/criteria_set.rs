//! The CriteriaSet composes criteria into one conjunctive predicate.

use crate::criteria::{CompanyCriterion, FlagCriterion, LevelCriterion, TagCriterion};
use crate::traits::Criterion;
use question_store::{Question, QuestionFilter};

/// Conjunction of criteria, built with the builder pattern.
///
/// ## Usage
/// ```ignore
/// let criteria = CriteriaSet::from_filter(&filter).hide_solved(true);
/// let visible = criteria.apply(store.questions().all());
/// ```
pub struct CriteriaSet {
    criteria: Vec<Box<dyn Criterion>>,
}

impl CriteriaSet {
    /// Create a new empty CriteriaSet, which matches every question.
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    /// Add a criterion to the set (builder pattern).
    pub fn add_criterion(mut self, criterion: impl Criterion + 'static) -> Self {
        self.criteria.push(Box::new(criterion));
        self
    }

    /// Translate a filter into criteria.
    ///
    /// Within a family (levels, tags, companies) any member matches; the
    /// families and the boolean flags are ANDed. Empty families add nothing.
    pub fn from_filter(filter: &QuestionFilter) -> Self {
        let mut set = Self::new();

        if !filter.levels.is_empty() {
            let levels = LevelCriterion::from_ranks(&filter.levels);
            if !levels.is_unconstrained() {
                set = set.add_criterion(levels);
            }
        }
        if !filter.tags.is_empty() {
            set = set.add_criterion(TagCriterion::new(filter.tags.clone()));
        }
        if !filter.companies.is_empty() {
            set = set.add_criterion(CompanyCriterion::new(filter.companies.clone()));
        }
        if filter.top_liked {
            set = set.add_criterion(FlagCriterion::top_liked());
        }
        if filter.top_interviewed {
            set = set.add_criterion(FlagCriterion::top_interviewed());
        }
        if filter.saved {
            set = set.add_criterion(FlagCriterion::saved());
        }
        set
    }

    /// Append the "hide solved" clause when `only_unsolved` is set.
    pub fn hide_solved(self, only_unsolved: bool) -> Self {
        if only_unsolved {
            self.add_criterion(FlagCriterion::unsolved())
        } else {
            self
        }
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.criteria.iter().map(|criterion| criterion.name()).collect()
    }

    pub fn matches(&self, question: &Question) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(question))
    }

    /// Apply all criteria in sequence, logging the count after each one.
    pub fn apply(&self, questions: Vec<Question>) -> Vec<Question> {
        let mut current = questions;
        for criterion in &self.criteria {
            tracing::debug!(
                "Applying criterion: {} (input count: {})",
                criterion.name(),
                current.len()
            );
            current = criterion.apply(current);
            tracing::debug!(
                "Criterion applied: {} (output count: {})",
                criterion.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for CriteriaSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use question_store::DifficultyLevel;

    fn questions() -> Vec<Question> {
        vec![
            Question {
                id: 1,
                difficulty_level: DifficultyLevel::Easy,
                tags: ["dp".to_string()].into_iter().collect(),
                top_liked: true,
                solved: true,
                ..Question::default()
            },
            Question {
                id: 2,
                difficulty_level: DifficultyLevel::Hard,
                tags: ["graph".to_string()].into_iter().collect(),
                saved: true,
                ..Question::default()
            },
        ]
    }

    #[test]
    fn test_empty_set() {
        let set = CriteriaSet::from_filter(&QuestionFilter::empty());
        assert!(set.is_empty());
        assert_eq!(set.apply(questions()).len(), 2);
    }

    #[test]
    fn test_only_active_families_are_added() {
        let filter = QuestionFilter {
            levels: [1].into_iter().collect(),
            top_liked: true,
            ..QuestionFilter::empty()
        };
        let set = CriteriaSet::from_filter(&filter);
        assert_eq!(set.names(), vec!["LevelCriterion", "FlagCriterion(top-liked)"]);
    }

    #[test]
    fn test_unknown_levels_add_nothing() {
        let filter = QuestionFilter {
            levels: [7].into_iter().collect(),
            ..QuestionFilter::empty()
        };
        assert!(CriteriaSet::from_filter(&filter).is_empty());
    }

    #[test]
    fn test_hide_solved() {
        let set = CriteriaSet::from_filter(&QuestionFilter::empty()).hide_solved(true);
        let kept = set.apply(questions());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);
    }
}
