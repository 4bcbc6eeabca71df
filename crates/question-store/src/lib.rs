//! # Question Store Crate
//!
//! Data model and persistence for the question library.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Question, QuestionList, Reminder, Note, ...)
//! - **question_filter**: The immutable `QuestionFilter` value
//! - **repository**: `Record`/`Repository` traits and the in-memory `Table`
//! - **store**: `QuestionStore`, the aggregate of all tables plus the vocabulary feed
//! - **notes**: Note editing
//! - **snapshot**: JSON load/save/import
//! - **config**: `AppConfig`
//! - **error**: Error types
//!
//! ## Example Usage
//!
//! ```ignore
//! use question_store::{QuestionFlag, QuestionStore};
//! use std::path::Path;
//!
//! let mut store = QuestionStore::load_from_file(Path::new("data/algo.json"))?;
//! store.toggle_flag(1, QuestionFlag::Saved)?;
//! store.save_to_file(Path::new("data/algo.json"))?;
//! ```

pub mod config;
pub mod error;
pub mod notes;
pub mod question_filter;
pub mod repository;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{Result, StoreError};
pub use question_filter::{QuestionFilter, TOP_INTERVIEWED_LABEL, TOP_LIKED_LABEL};
pub use repository::{Predicate, Record, Repository, Table};
pub use snapshot::StoreSnapshot;
pub use store::QuestionStore;
pub use types::{
    // Type aliases
    QuestionId,
    RecordId,
    // Core types
    Company,
    Note,
    Question,
    QuestionList,
    Reminder,
    Tag,
    Vocabulary,
    // Enums
    DifficultyLevel,
    Language,
    QuestionFlag,
    WEEKDAY_NAMES,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_creation() {
        let store = QuestionStore::new();
        assert_eq!(store.counts(), (0, 0, 0, 0));
        assert!(store.vocabulary().tags.is_empty());
    }

    #[test]
    fn test_empty_queries() {
        let store = QuestionStore::new();

        assert!(store.question(999).is_none());
        assert!(store.lists().get(&"missing".to_string()).is_none());
        assert!(store.notes_by_recency().is_empty());
        assert!(store.reminders().all().is_empty());
    }
}
