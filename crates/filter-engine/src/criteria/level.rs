//! Keep questions whose difficulty is one of the selected levels.

use crate::traits::Criterion;
use question_store::{DifficultyLevel, Question};
use std::collections::BTreeSet;

pub struct LevelCriterion {
    levels: BTreeSet<DifficultyLevel>,
}

impl LevelCriterion {
    /// Build from raw ranks. Ranks that don't name a level are dropped; if
    /// none are left the criterion matches everything.
    pub fn from_ranks(ranks: &BTreeSet<i32>) -> Self {
        let levels: BTreeSet<DifficultyLevel> = ranks
            .iter()
            .filter_map(|&rank| DifficultyLevel::from_rank(rank))
            .collect();
        if levels.len() != ranks.len() {
            tracing::warn!("Ignoring unknown difficulty ranks in {:?}", ranks);
        }
        Self { levels }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Criterion for LevelCriterion {
    fn name(&self) -> &str {
        "LevelCriterion"
    }

    fn matches(&self, question: &Question) -> bool {
        self.is_unconstrained() || self.levels.contains(&question.difficulty_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, level: DifficultyLevel) -> Question {
        Question {
            id,
            difficulty_level: level,
            ..Question::default()
        }
    }

    #[test]
    fn test_level_criterion() {
        let criterion = LevelCriterion::from_ranks(&[1, 3].into_iter().collect());

        assert!(criterion.matches(&question(1, DifficultyLevel::Easy)));
        assert!(!criterion.matches(&question(2, DifficultyLevel::Medium)));
        assert!(criterion.matches(&question(3, DifficultyLevel::Hard)));
    }

    #[test]
    fn test_unknown_ranks_are_unconstrained() {
        let criterion = LevelCriterion::from_ranks(&[0, 99].into_iter().collect());

        assert!(criterion.is_unconstrained());
        assert!(criterion.matches(&question(2, DifficultyLevel::Medium)));
    }
}
