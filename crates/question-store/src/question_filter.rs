//! The immutable filter value shared by the list views, counters and reminders.

use crate::types::DifficultyLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const TOP_LIKED_LABEL: &str = "Top Liked 👍";
pub const TOP_INTERVIEWED_LABEL: &str = "Top Interviewed 👩‍💻";

/// Set of active predicates over questions.
///
/// An absent predicate means "no constraint": [`QuestionFilter::empty`]
/// matches every question. Levels are difficulty ranks; ranks that don't name
/// a [`DifficultyLevel`] are ignored when matching.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionFilter {
    pub tags: BTreeSet<String>,
    pub companies: BTreeSet<String>,
    pub levels: BTreeSet<i32>,
    pub top_liked: bool,
    pub top_interviewed: bool,
    pub saved: bool,
}

impl QuestionFilter {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// The levels of this filter that name a real difficulty.
    pub fn difficulty_levels(&self) -> BTreeSet<DifficultyLevel> {
        self.levels
            .iter()
            .filter_map(|&rank| DifficultyLevel::from_rank(rank))
            .collect()
    }

    /// Human-readable chips for every active predicate, in display order:
    /// levels, tags, companies, top liked, top interviewed.
    pub fn all_filters(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .difficulty_levels()
            .into_iter()
            .map(|level| level.title().to_string())
            .collect();
        labels.extend(self.tags.iter().cloned());
        labels.extend(self.companies.iter().cloned());
        if self.top_liked {
            labels.push(TOP_LIKED_LABEL.to_string());
        }
        if self.top_interviewed {
            labels.push(TOP_INTERVIEWED_LABEL.to_string());
        }
        labels
    }

    /// Copy of this filter with the saved-only flag cleared.
    pub fn without_saved(&self) -> Self {
        Self {
            saved: false,
            ..self.clone()
        }
    }
}
