//! Criterion implementations, one per predicate family.

pub mod company;
pub mod flags;
pub mod level;
pub mod tag;

// Re-export for convenience
pub use company::CompanyCriterion;
pub use flags::FlagCriterion;
pub use level::LevelCriterion;
pub use tag::TagCriterion;
