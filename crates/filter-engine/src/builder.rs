//! FilterBuilder accumulates toggle selections and publishes the resulting
//! `QuestionFilter` to subscribers.

use question_store::{
    DifficultyLevel, QuestionFilter, Vocabulary, TOP_INTERVIEWED_LABEL, TOP_LIKED_LABEL,
};
use std::collections::BTreeSet;
use tokio::sync::watch;

pub const REMARK_TOP_LIKED: &str = "Top Liked";
pub const REMARK_TOP_INTERVIEWED: &str = "Top Interviewed";

/// Remark tokens that map onto boolean filter flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remark {
    TopLiked,
    TopInterviewed,
}

impl Remark {
    /// Accepts the bare token or the chip label with its emoji.
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        if key.eq_ignore_ascii_case(REMARK_TOP_LIKED) || key == TOP_LIKED_LABEL {
            Some(Remark::TopLiked)
        } else if key.eq_ignore_ascii_case(REMARK_TOP_INTERVIEWED) || key == TOP_INTERVIEWED_LABEL {
            Some(Remark::TopInterviewed)
        } else {
            None
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Remark::TopLiked => REMARK_TOP_LIKED,
            Remark::TopInterviewed => REMARK_TOP_INTERVIEWED,
        }
    }
}

/// Toggle-sets of the current selection, in the order they were switched on.
///
/// Equality ignores that order: two selections are equal when they hold the
/// same members.
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    pub categories: Vec<String>,
    pub companies: Vec<String>,
    pub levels: Vec<String>,
    pub remarks: Vec<String>,
    pub saved: bool,
}

fn members(values: &[String]) -> BTreeSet<&str> {
    values.iter().map(String::as_str).collect()
}

impl PartialEq for FilterSelection {
    fn eq(&self, other: &Self) -> bool {
        members(&self.categories) == members(&other.categories)
            && members(&self.companies) == members(&other.companies)
            && members(&self.levels) == members(&other.levels)
            && members(&self.remarks) == members(&other.remarks)
            && self.saved == other.saved
    }
}

impl Eq for FilterSelection {}

fn toggle(selection: &mut Vec<String>, value: &str) {
    if let Some(index) = selection.iter().position(|selected| selected == value) {
        selection.remove(index);
    } else {
        selection.push(value.to_string());
    }
}

/// Builds a [`QuestionFilter`] from independent toggles.
///
/// ## Usage
/// ```ignore
/// let mut builder = FilterBuilder::new(store.subscribe_vocabulary());
/// let mut filters = builder.subscribe();
///
/// builder.update_category("dp");
/// builder.update_level("Easy");
///
/// let filter = filters.borrow_and_update().clone();
/// let count = count_problems(store.questions(), Some(&filter), false);
/// ```
pub struct FilterBuilder {
    selection: FilterSelection,
    vocabulary: watch::Receiver<Vocabulary>,
    current: watch::Sender<QuestionFilter>,
}

impl FilterBuilder {
    pub fn new(vocabulary: watch::Receiver<Vocabulary>) -> Self {
        let (current, _) = watch::channel(QuestionFilter::empty());
        Self {
            selection: FilterSelection::default(),
            vocabulary,
            current,
        }
    }

    /// Seed the selection from an existing filter (editing a saved reminder).
    pub fn from_filter(filter: &QuestionFilter, vocabulary: watch::Receiver<Vocabulary>) -> Self {
        let mut builder = Self::new(vocabulary);
        builder.selection = FilterSelection {
            categories: filter.tags.iter().cloned().collect(),
            companies: filter.companies.iter().cloned().collect(),
            levels: filter
                .difficulty_levels()
                .into_iter()
                .map(|level| level.title().to_string())
                .collect(),
            remarks: [
                (filter.top_liked, Remark::TopLiked),
                (filter.top_interviewed, Remark::TopInterviewed),
            ]
            .into_iter()
            .filter(|(active, _)| *active)
            .map(|(_, remark)| remark.token().to_string())
            .collect(),
            saved: filter.saved,
        };
        builder.publish();
        builder
    }

    pub fn update_category(&mut self, category: &str) {
        toggle(&mut self.selection.categories, category);
        self.publish();
    }

    pub fn update_company(&mut self, company: &str) {
        toggle(&mut self.selection.companies, company);
        self.publish();
    }

    /// Levels are stored by title, so "easy", "Easy" and "1" toggle the same entry.
    pub fn update_level(&mut self, level: &str) {
        let key = DifficultyLevel::parse(level)
            .map(DifficultyLevel::title)
            .unwrap_or(level);
        toggle(&mut self.selection.levels, key);
        self.publish();
    }

    pub fn update_remark(&mut self, remark: &str) {
        toggle(&mut self.selection.remarks, remark);
        self.publish();
    }

    pub fn set_saved(&mut self, saved: bool) {
        self.selection.saved = saved;
        self.publish();
    }

    /// Drop every selection and publish the empty filter.
    pub fn reset(&mut self) {
        self.selection = FilterSelection::default();
        self.publish();
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Materialize the current selection. `should_clear_all` short-circuits
    /// to the empty filter without touching the selection.
    pub fn build_filter(&self, should_clear_all: bool) -> QuestionFilter {
        if should_clear_all {
            return QuestionFilter::empty();
        }

        let levels = self
            .selection
            .levels
            .iter()
            .filter_map(|key| {
                let level = DifficultyLevel::parse(key);
                if level.is_none() {
                    tracing::warn!("Ignoring unknown level selection {:?}", key);
                }
                level
            })
            .map(DifficultyLevel::rank)
            .collect();
        let remarks: Vec<Remark> = self
            .selection
            .remarks
            .iter()
            .filter_map(|key| Remark::parse(key))
            .collect();

        QuestionFilter {
            tags: self.selection.categories.iter().cloned().collect(),
            companies: self.selection.companies.iter().cloned().collect(),
            levels,
            top_liked: remarks.contains(&Remark::TopLiked),
            top_interviewed: remarks.contains(&Remark::TopInterviewed),
            saved: self.selection.saved,
        }
    }

    /// Latest published filter.
    pub fn current(&self) -> QuestionFilter {
        self.current.borrow().clone()
    }

    /// Receiver that sees a new filter after every toggle.
    pub fn subscribe(&self) -> watch::Receiver<QuestionFilter> {
        self.current.subscribe()
    }

    /// Every tag name currently in the store.
    pub fn all_tags(&self) -> Vec<String> {
        self.vocabulary.borrow().tags.clone()
    }

    /// Every company name currently in the store.
    pub fn all_companies(&self) -> Vec<String> {
        self.vocabulary.borrow().companies.clone()
    }

    fn publish(&self) {
        self.current.send_replace(self.build_filter(false));
    }
}
