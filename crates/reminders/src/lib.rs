//! Reminders scoped to a subset of questions.
//!
//! A reminder may carry a `QuestionFilter`; when it fires, the question it
//! surfaces is drawn from that filter's matches. This crate owns the
//! reminder lifecycle and talks to two collaborators through traits:
//!
//! - [`NotificationScheduler`]: schedules and cancels platform notifications
//! - [`Entitlements`]: the premium gate in front of saving reminders
//!
//! ## Example Usage
//! ```ignore
//! use reminders::{InMemoryScheduler, ReminderDraft, ReminderService};
//!
//! let mut service = ReminderService::new(InMemoryScheduler::new(), config.clone());
//! let reminder = service.save_reminder(&mut store, draft)?;
//! service.toggle_reminder(&mut store, &reminder.id)?;
//! service.delete_reminder(&mut store, &reminder.id)?;
//! ```

pub mod entitlement;
pub mod error;
pub mod scheduler;
pub mod service;

pub use entitlement::Entitlements;
pub use error::{ReminderError, Result};
pub use scheduler::{InMemoryScheduler, NotificationScheduler, ScheduledNotification, UpdateCall};
pub use service::{count_problems_for, pick_question, ReminderDraft, ReminderService};
