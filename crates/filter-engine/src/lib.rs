//! Question filtering and list derivation.
//!
//! This crate provides:
//! - Criterion trait and implementations, one per predicate family
//! - CriteriaSet for composing criteria from a `QuestionFilter`
//! - FilterBuilder, the toggle accumulator that publishes filters
//! - List derivation (`derive`, `count_problems`) and named lists
//!
//! ## Architecture
//! Data flows one way:
//! 1. Toggles update the FilterBuilder, which publishes a new `QuestionFilter`
//! 2. The filter becomes a CriteriaSet (plus the caller's "hide solved" clause)
//! 3. The CriteriaSet is evaluated against the store's question table
//!
//! ## Example Usage
//! ```ignore
//! use filter_engine::{count_problems, derive, FilterBuilder};
//!
//! let mut builder = FilterBuilder::new(store.subscribe_vocabulary());
//! builder.update_category("dp");
//! builder.update_level("Easy");
//!
//! let filter = builder.build_filter(false);
//! let questions = derive(store.questions(), &filter, config.hides_solved_problems);
//! let count = count_problems(store.questions(), Some(&filter), config.hides_solved_problems);
//! assert_eq!(questions.len(), count);
//! ```

pub mod builder;
pub mod criteria;
pub mod criteria_set;
pub mod derivation;
pub mod lists;
pub mod traits;

// Re-export main types
pub use builder::{FilterBuilder, FilterSelection, Remark, REMARK_TOP_INTERVIEWED, REMARK_TOP_LIKED};
pub use criteria_set::CriteriaSet;
pub use derivation::{count_problems, criteria_for, derive};
pub use lists::{
    add_to_list, create_custom_list, list_questions, rebuild_special_list, remove_from_list,
    saved_list, solved_list, special_list, SpecialList, SAVED_LIST_ID, SOLVED_LIST_ID,
};
pub use question_store::QuestionFilter;
pub use traits::Criterion;
