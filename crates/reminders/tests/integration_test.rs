//! Integration tests for the reminder lifecycle against a real store.

use chrono::{TimeZone, Utc};
use question_store::{
    AppConfig, DifficultyLevel, Question, QuestionFilter, QuestionStore, Repository,
};
use reminders::*;
use std::collections::BTreeSet;

fn create_test_store() -> QuestionStore {
    let mut store = QuestionStore::new();
    store.insert_questions((1..=6).map(|id| Question {
        id,
        title: format!("Question {}", id),
        difficulty_level: DifficultyLevel::ALL[(id as usize - 1) % 3],
        solved: id % 2 == 0,
        ..Question::default()
    }));
    store
}

fn premium() -> AppConfig {
    AppConfig {
        is_premium: true,
        ..AppConfig::default()
    }
}

fn draft(id: &str, days: &[u8]) -> ReminderDraft {
    ReminderDraft {
        id: Some(id.to_string()),
        date: Utc.with_ymd_and_hms(2024, 6, 3, 19, 0, 0).unwrap(),
        repeat_days: days.iter().copied().collect::<BTreeSet<u8>>(),
        send_problem: true,
        filter: QuestionFilter::empty(),
    }
}

#[test]
fn test_delete_cancels_scheduled_notifications() {
    let mut store = create_test_store();
    let mut service = ReminderService::new(InMemoryScheduler::new(), premium());

    service.save_reminder(&mut store, draft("r1", &[2, 4])).unwrap();
    assert_eq!(service.scheduler().scheduled_for("r1").len(), 2);

    let removed = service.delete_reminder(&mut store, "r1").unwrap();
    assert!(removed.is_some());
    assert!(service.scheduler().scheduled_for("r1").is_empty());
    assert!(store.reminders().get(&"r1".to_string()).is_none());
}

#[test]
fn test_toggle_triggers_exactly_one_update() {
    let mut store = create_test_store();
    let mut service = ReminderService::new(InMemoryScheduler::new(), premium());

    let saved = service.save_reminder(&mut store, draft("r1", &[])).unwrap();
    assert!(saved.enabled);
    let updates_before = service.scheduler().updates().len();

    let toggled = service.toggle_reminder(&mut store, "r1").unwrap().unwrap();
    assert!(!toggled.enabled);

    let new_updates = &service.scheduler().updates()[updates_before..];
    assert_eq!(
        new_updates,
        &[UpdateCall {
            reminder_id: "r1".to_string(),
            enabled: false,
        }]
    );
    assert!(service.scheduler().scheduled_for("r1").is_empty());
    assert!(!store.reminders().get(&"r1".to_string()).unwrap().enabled);

    service.toggle_reminder(&mut store, "r1").unwrap();
    assert_eq!(service.scheduler().scheduled_for("r1").len(), 1);
}

#[test]
fn test_premium_gate_uses_config() {
    let mut store = create_test_store();
    let mut service = ReminderService::new(InMemoryScheduler::new(), AppConfig::default());

    let result = service.save_reminder(&mut store, draft("r1", &[1]));
    assert!(matches!(result, Err(ReminderError::PremiumRequired)));
    assert!(store.reminders().is_empty());
}

#[test]
fn test_reminder_filter_scopes_picked_question() {
    let mut store = create_test_store();
    let mut service = ReminderService::new(InMemoryScheduler::new(), premium());

    let mut hard_only = draft("r1", &[3]);
    hard_only.filter = QuestionFilter {
        levels: [DifficultyLevel::Hard.rank()].into_iter().collect(),
        ..QuestionFilter::empty()
    };
    let reminder = service.save_reminder(&mut store, hard_only).unwrap();

    // Hard questions are 3 and 6; 6 is solved.
    assert_eq!(count_problems_for(&store, reminder.filter.as_ref(), false), 2);
    assert_eq!(count_problems_for(&store, reminder.filter.as_ref(), true), 1);

    let mut rng = rand::rng();
    for _ in 0..20 {
        let picked = pick_question(&store, &reminder, true, &mut rng).unwrap();
        assert_eq!(picked.id, 3);
    }
}

#[test]
fn test_reminders_survive_snapshot() {
    let mut store = create_test_store();
    let mut service = ReminderService::new(InMemoryScheduler::new(), premium());
    service.save_reminder(&mut store, draft("r1", &[2, 3, 4, 5, 6])).unwrap();

    let restored = QuestionStore::from_snapshot(store.to_snapshot());
    let reminders = service.reminders(&restored);

    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].repeat_description(), "Weekdays");
    assert_eq!(reminders[0].filter, Some(QuestionFilter::empty()));
}
