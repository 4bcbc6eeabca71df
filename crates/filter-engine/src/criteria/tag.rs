//! Keep questions carrying at least one of the selected tags.

use crate::traits::Criterion;
use question_store::Question;
use std::collections::BTreeSet;

pub struct TagCriterion {
    tags: BTreeSet<String>,
}

impl TagCriterion {
    pub fn new(tags: BTreeSet<String>) -> Self {
        Self { tags }
    }
}

impl Criterion for TagCriterion {
    fn name(&self) -> &str {
        "TagCriterion"
    }

    fn matches(&self, question: &Question) -> bool {
        self.tags.is_empty() || !question.tags.is_disjoint(&self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_overlap() {
        let criterion =
            TagCriterion::new(["dp".to_string(), "graph".to_string()].into_iter().collect());

        let dp = Question {
            id: 1,
            tags: ["dp".to_string(), "array".to_string()].into_iter().collect(),
            ..Question::default()
        };
        let tree = Question {
            id: 2,
            tags: ["tree".to_string()].into_iter().collect(),
            ..Question::default()
        };

        let kept = criterion.apply(vec![dp, tree]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }
}
