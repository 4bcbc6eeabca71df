//! Keep questions asked by at least one of the selected companies.

use crate::traits::Criterion;
use question_store::Question;
use std::collections::BTreeSet;

pub struct CompanyCriterion {
    companies: BTreeSet<String>,
}

impl CompanyCriterion {
    pub fn new(companies: BTreeSet<String>) -> Self {
        Self { companies }
    }
}

impl Criterion for CompanyCriterion {
    fn name(&self) -> &str {
        "CompanyCriterion"
    }

    fn matches(&self, question: &Question) -> bool {
        self.companies.is_empty() || !question.companies.is_disjoint(&self.companies)
    }
}
