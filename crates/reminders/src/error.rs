//! Error types for the reminders crate.

use question_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReminderError {
    /// Reminders are a premium feature; the caller should present the upsell.
    #[error("Reminders require a premium subscription")]
    PremiumRequired,

    /// Repeat days must be in 1..=7 (1 = Sunday)
    #[error("Invalid repeat day: {0}")]
    InvalidWeekday(u8),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The notification scheduler rejected the request
    #[error(transparent)]
    Scheduler(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ReminderError>;
