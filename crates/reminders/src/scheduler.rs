//! The notification scheduler seam.
//!
//! Delivering local notifications is platform work outside this crate. The
//! reminder service only tells the scheduler what should be pending.

use anyhow::Result;
use chrono::{DateTime, Utc};
use question_store::{QuestionFilter, RecordId, Reminder};
use std::collections::BTreeMap;

/// Platform notification scheduler.
pub trait NotificationScheduler {
    /// Returns the name of this scheduler (for logging/debugging)
    fn name(&self) -> &str;

    /// Schedule the notifications of a reminder.
    fn schedule(&mut self, reminder: &Reminder) -> Result<()>;

    /// Cancel every pending notification of a reminder. Unknown ids are ignored.
    fn cancel(&mut self, reminder_id: &str) -> Result<()>;

    /// Make the pending notifications reflect the reminder's current state:
    /// cancel what's there, then reschedule if the reminder is enabled.
    fn update_scheduled_notifications(&mut self, reminder: &Reminder) -> Result<()> {
        self.cancel(&reminder.id)?;
        if reminder.enabled {
            self.schedule(reminder)?;
        }
        Ok(())
    }
}

/// One pending notification. Repeating reminders get one per weekday.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledNotification {
    pub reminder_id: RecordId,
    pub date: DateTime<Utc>,
    /// `None` for a one-time reminder.
    pub weekday: Option<u8>,
    pub filter: Option<QuestionFilter>,
}

/// Record of one `update_scheduled_notifications` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCall {
    pub reminder_id: RecordId,
    pub enabled: bool,
}

/// Scheduler that keeps pending notifications in memory.
#[derive(Debug, Default)]
pub struct InMemoryScheduler {
    pending: BTreeMap<String, ScheduledNotification>,
    updates: Vec<UpdateCall>,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending notifications for one reminder.
    pub fn scheduled_for(&self, reminder_id: &str) -> Vec<&ScheduledNotification> {
        self.pending
            .values()
            .filter(|notification| notification.reminder_id == reminder_id)
            .collect()
    }

    /// Every update call received so far, oldest first.
    pub fn updates(&self) -> &[UpdateCall] {
        &self.updates
    }

    fn notification_key(reminder_id: &str, weekday: Option<u8>) -> String {
        match weekday {
            Some(day) => format!("{}-{}", reminder_id, day),
            None => reminder_id.to_string(),
        }
    }
}

impl NotificationScheduler for InMemoryScheduler {
    fn name(&self) -> &str {
        "InMemoryScheduler"
    }

    fn schedule(&mut self, reminder: &Reminder) -> Result<()> {
        let weekdays: Vec<Option<u8>> = if reminder.is_repeating() {
            reminder.repeat_days.iter().map(|&day| Some(day)).collect()
        } else {
            vec![None]
        };

        for weekday in weekdays {
            self.pending.insert(
                Self::notification_key(&reminder.id, weekday),
                ScheduledNotification {
                    reminder_id: reminder.id.clone(),
                    date: reminder.date,
                    weekday,
                    filter: reminder.filter.clone(),
                },
            );
        }
        Ok(())
    }

    fn cancel(&mut self, reminder_id: &str) -> Result<()> {
        self.pending
            .retain(|_, notification| notification.reminder_id != reminder_id);
        Ok(())
    }

    fn update_scheduled_notifications(&mut self, reminder: &Reminder) -> Result<()> {
        self.updates.push(UpdateCall {
            reminder_id: reminder.id.clone(),
            enabled: reminder.enabled,
        });
        self.cancel(&reminder.id)?;
        if reminder.enabled {
            self.schedule(reminder)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn reminder(id: &str, days: &[u8], enabled: bool) -> Reminder {
        Reminder {
            id: id.to_string(),
            date: Utc::now(),
            repeat_days: days.iter().copied().collect::<BTreeSet<u8>>(),
            enabled,
            filter: None,
        }
    }

    #[test]
    fn test_one_notification_per_weekday() {
        let mut scheduler = InMemoryScheduler::new();
        scheduler.schedule(&reminder("r1", &[2, 4, 6], true)).unwrap();
        scheduler.schedule(&reminder("r2", &[], true)).unwrap();

        assert_eq!(scheduler.scheduled_for("r1").len(), 3);
        assert_eq!(scheduler.scheduled_for("r2").len(), 1);
        assert_eq!(scheduler.scheduled_for("r2")[0].weekday, None);
    }

    #[test]
    fn test_update_reflects_enabled_state() {
        let mut scheduler = InMemoryScheduler::new();
        scheduler
            .update_scheduled_notifications(&reminder("r1", &[1], true))
            .unwrap();
        assert_eq!(scheduler.scheduled_for("r1").len(), 1);

        scheduler
            .update_scheduled_notifications(&reminder("r1", &[1], false))
            .unwrap();
        assert!(scheduler.scheduled_for("r1").is_empty());
        assert_eq!(scheduler.updates().len(), 2);
    }

    #[test]
    fn test_cancel_unknown_is_ignored() {
        let mut scheduler = InMemoryScheduler::new();
        assert!(scheduler.cancel("nope").is_ok());
    }
}
