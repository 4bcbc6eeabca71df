//! Reminder lifecycle: save, delete, toggle, and picking the question a
//! fired reminder should surface.

use crate::entitlement::Entitlements;
use crate::error::{ReminderError, Result};
use crate::scheduler::NotificationScheduler;
use chrono::{DateTime, Utc};
use filter_engine::{count_problems, derive};
use question_store::{
    Question, QuestionFilter, QuestionStore, RecordId, Reminder, Repository,
};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeSet;
use tracing::info;

/// What the reminder editor submits.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderDraft {
    /// `Some` when editing an existing reminder.
    pub id: Option<RecordId>,
    pub date: DateTime<Utc>,
    /// Empty means one-time.
    pub repeat_days: BTreeSet<u8>,
    /// Whether the notification should carry a question from `filter`.
    pub send_problem: bool,
    pub filter: QuestionFilter,
}

/// Coordinates reminder records in the store with the notification scheduler.
///
/// Every lifecycle change reaches the scheduler immediately; nothing is batched.
pub struct ReminderService<S, E> {
    scheduler: S,
    entitlements: E,
}

impl<S, E> ReminderService<S, E>
where
    S: NotificationScheduler,
    E: Entitlements,
{
    pub fn new(scheduler: S, entitlements: E) -> Self {
        Self {
            scheduler,
            entitlements,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Create or edit a reminder.
    ///
    /// ## Algorithm
    /// 1. Refuse without premium (the caller shows the upsell instead)
    /// 2. Validate repeat days
    /// 3. Attach the filter only when `send_problem` is on; reminder filters
    ///    never carry the saved-only flag
    /// 4. Bring the scheduler up to date, then persist; a scheduler failure
    ///    leaves the store untouched
    pub fn save_reminder(
        &mut self,
        store: &mut QuestionStore,
        draft: ReminderDraft,
    ) -> Result<Reminder> {
        if !self.entitlements.is_premium() {
            return Err(ReminderError::PremiumRequired);
        }
        if let Some(&day) = draft.repeat_days.iter().find(|&&day| !(1..=7).contains(&day)) {
            return Err(ReminderError::InvalidWeekday(day));
        }

        let reminder = Reminder {
            id: draft
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            date: draft.date,
            repeat_days: draft.repeat_days,
            enabled: true,
            filter: draft
                .send_problem
                .then(|| draft.filter.without_saved()),
        };

        self.scheduler.update_scheduled_notifications(&reminder)?;
        let previous = store.reminders_mut().put(reminder.clone());
        info!(
            "{} reminder {} ({})",
            if previous.is_some() { "Updated" } else { "Created" },
            reminder.id,
            reminder.repeat_description()
        );
        Ok(reminder)
    }

    /// Delete a reminder, cancelling its notifications before the record goes.
    ///
    /// Unknown ids are a silent no-op and return `None`.
    pub fn delete_reminder(
        &mut self,
        store: &mut QuestionStore,
        id: &str,
    ) -> Result<Option<Reminder>> {
        self.scheduler.cancel(id)?;
        let removed = store.reminders_mut().delete(&id.to_string());
        if removed.is_some() {
            info!("Deleted reminder {} via {}", id, self.scheduler.name());
        }
        Ok(removed)
    }

    /// Flip `enabled` and push the new state to the scheduler right away.
    pub fn toggle_reminder(
        &mut self,
        store: &mut QuestionStore,
        id: &str,
    ) -> Result<Option<Reminder>> {
        let Some(mut reminder) = store.reminders().get(&id.to_string()) else {
            return Ok(None);
        };

        reminder.enabled = !reminder.enabled;
        self.scheduler.update_scheduled_notifications(&reminder)?;
        store.reminders_mut().put(reminder.clone());
        info!("Reminder {} enabled: {}", reminder.id, reminder.enabled);
        Ok(Some(reminder))
    }

    /// All reminders, earliest first.
    pub fn reminders(&self, store: &QuestionStore) -> Vec<Reminder> {
        let mut reminders = store.reminders().all();
        reminders.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        reminders
    }
}

/// "N problems found" preview for the reminder editor. Pass `None` when the
/// reminder won't send a problem; every question counts then.
pub fn count_problems_for(
    store: &QuestionStore,
    filter: Option<&QuestionFilter>,
    only_unsolved: bool,
) -> usize {
    count_problems(store.questions(), filter, only_unsolved)
}

/// Pick the question a fired reminder surfaces: a random member of its
/// filtered subset, or of every question when it has no filter.
pub fn pick_question<R>(
    store: &QuestionStore,
    reminder: &Reminder,
    only_unsolved: bool,
    rng: &mut R,
) -> Option<Question>
where
    R: Rng + ?Sized,
{
    let empty = QuestionFilter::empty();
    let filter = reminder.filter.as_ref().unwrap_or(&empty);
    let candidates = derive(store.questions(), filter, only_unsolved);
    candidates.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::InMemoryScheduler;
    use chrono::TimeZone;
    use question_store::DifficultyLevel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn store() -> QuestionStore {
        let mut store = QuestionStore::new();
        store.insert_questions(vec![
            Question {
                id: 1,
                difficulty_level: DifficultyLevel::Easy,
                ..Question::default()
            },
            Question {
                id: 2,
                difficulty_level: DifficultyLevel::Hard,
                solved: true,
                ..Question::default()
            },
        ]);
        store
    }

    fn draft(days: &[u8]) -> ReminderDraft {
        ReminderDraft {
            id: None,
            date: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
            repeat_days: days.iter().copied().collect(),
            send_problem: false,
            filter: QuestionFilter::empty(),
        }
    }

    #[test]
    fn test_save_requires_premium() {
        let mut store = store();
        let mut service = ReminderService::new(InMemoryScheduler::new(), false);

        let err = service.save_reminder(&mut store, draft(&[2])).unwrap_err();
        assert!(matches!(err, ReminderError::PremiumRequired));
        assert!(store.reminders().is_empty());
        assert!(service.scheduler().updates().is_empty());
    }

    #[test]
    fn test_save_rejects_bad_weekday() {
        let mut store = store();
        let mut service = ReminderService::new(InMemoryScheduler::new(), true);

        let err = service.save_reminder(&mut store, draft(&[0, 3])).unwrap_err();
        assert!(matches!(err, ReminderError::InvalidWeekday(0)));
    }

    #[test]
    fn test_filter_attached_only_when_sending_problem() {
        let mut store = store();
        let mut service = ReminderService::new(InMemoryScheduler::new(), true);

        let without = service.save_reminder(&mut store, draft(&[])).unwrap();
        assert!(without.filter.is_none());
        assert!(!without.is_repeating());

        let mut with = draft(&[1, 7]);
        with.send_problem = true;
        with.filter = QuestionFilter {
            levels: [3].into_iter().collect(),
            saved: true,
            ..QuestionFilter::empty()
        };
        let reminder = service.save_reminder(&mut store, with).unwrap();
        let filter = reminder.filter.unwrap();
        assert_eq!(filter.levels, [3].into_iter().collect::<BTreeSet<i32>>());
        assert!(!filter.saved);
    }

    #[test]
    fn test_edit_keeps_id() {
        let mut store = store();
        let mut service = ReminderService::new(InMemoryScheduler::new(), true);
        let created = service.save_reminder(&mut store, draft(&[2])).unwrap();

        let mut edit = draft(&[3]);
        edit.id = Some(created.id.clone());
        let edited = service.save_reminder(&mut store, edit).unwrap();

        assert_eq!(edited.id, created.id);
        assert_eq!(store.reminders().len(), 1);
        assert_eq!(service.scheduler().scheduled_for(&created.id).len(), 1);
        assert_eq!(service.scheduler().scheduled_for(&created.id)[0].weekday, Some(3));
    }

    struct UnavailableScheduler;

    impl NotificationScheduler for UnavailableScheduler {
        fn name(&self) -> &str {
            "UnavailableScheduler"
        }

        fn schedule(&mut self, _reminder: &Reminder) -> anyhow::Result<()> {
            anyhow::bail!("notifications not authorized")
        }

        fn cancel(&mut self, _reminder_id: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_scheduler_failure_leaves_store_untouched() {
        let mut store = store();
        let mut service = ReminderService::new(UnavailableScheduler, true);

        let err = service.save_reminder(&mut store, draft(&[2])).unwrap_err();
        assert!(matches!(err, ReminderError::Scheduler(_)));
        assert!(store.reminders().is_empty());
    }

    #[test]
    fn test_toggle_and_delete_missing_are_noops() {
        let mut store = store();
        let mut service = ReminderService::new(InMemoryScheduler::new(), true);

        assert!(service.toggle_reminder(&mut store, "ghost").unwrap().is_none());
        assert!(service.delete_reminder(&mut store, "ghost").unwrap().is_none());
        assert!(service.scheduler().updates().is_empty());
    }

    #[test]
    fn test_count_problems_for_preview() {
        let store = store();
        let hard = QuestionFilter {
            levels: [3].into_iter().collect(),
            ..QuestionFilter::empty()
        };
        assert_eq!(count_problems_for(&store, None, false), 2);
        assert_eq!(count_problems_for(&store, Some(&hard), false), 1);
        assert_eq!(count_problems_for(&store, Some(&hard), true), 0);
    }

    #[test]
    fn test_pick_question_respects_filter() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(7);
        let reminder = Reminder {
            id: "r1".to_string(),
            date: Utc::now(),
            repeat_days: BTreeSet::new(),
            enabled: true,
            filter: Some(QuestionFilter {
                levels: [1].into_iter().collect(),
                ..QuestionFilter::empty()
            }),
        };

        for _ in 0..10 {
            assert_eq!(pick_question(&store, &reminder, false, &mut rng).unwrap().id, 1);
        }

        let unsolved_hard = Reminder {
            filter: Some(QuestionFilter {
                levels: [3].into_iter().collect(),
                ..QuestionFilter::empty()
            }),
            ..reminder
        };
        assert!(pick_question(&store, &unsolved_hard, true, &mut rng).is_none());
    }
}
