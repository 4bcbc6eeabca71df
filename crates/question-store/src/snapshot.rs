//! JSON persistence for the store.
//!
//! Two file shapes are understood:
//! - a full snapshot: `{questions, lists, reminders, notes}`
//! - a question import: a bare JSON array of questions

use crate::error::{Result, StoreError};
use crate::repository::{Repository, Table};
use crate::store::QuestionStore;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk layout of a whole store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    pub questions: Vec<Question>,
    pub lists: Vec<QuestionList>,
    pub reminders: Vec<Reminder>,
    pub notes: Vec<Note>,
}

impl QuestionStore {
    /// Load a store from a snapshot file.
    ///
    /// A missing file yields an empty store, so the first run needs no setup.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No snapshot at {:?}, starting with an empty store", path);
            return Ok(Self::new());
        }

        let raw = fs::read_to_string(path)?;
        let snapshot: StoreSnapshot = serde_json::from_str(&raw)?;
        let store = Self::from_snapshot(snapshot);
        store.validate()?;

        let (questions, lists, reminders, notes) = store.counts();
        tracing::info!(
            "Loaded {} questions, {} lists, {} reminders, {} notes from {:?}",
            questions,
            lists,
            reminders,
            notes,
            path
        );
        Ok(store)
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self::from_tables(
            Table::from_records(snapshot.questions),
            Table::from_records(snapshot.lists),
            Table::from_records(snapshot.reminders),
            Table::from_records(snapshot.notes),
        )
    }

    pub fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            questions: self.questions.all(),
            lists: self.lists.all(),
            reminders: self.reminders.all(),
            notes: self.notes.all(),
        }
    }

    /// Write the whole store as pretty-printed JSON, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.to_snapshot())?;
        fs::write(path, json)?;
        tracing::info!("Saved store to {:?}", path);
        Ok(())
    }

    /// Import a JSON array of questions. Questions with a known id get the new
    /// catalogue fields but keep their flags and note.
    ///
    /// Returns the number of questions imported.
    pub fn import_questions(&mut self, path: &Path) -> Result<usize> {
        let raw = fs::read_to_string(path)?;
        let questions: Vec<Question> = serde_json::from_str(&raw)?;
        let imported = self.insert_questions(questions);
        tracing::info!("Imported {} questions from {:?}", imported, path);
        Ok(imported)
    }

    /// Check that:
    /// - reminder repeat days are in 1..=7
    /// - notes linked to a question point at a stored question
    pub fn validate(&self) -> Result<()> {
        for reminder in self.reminders.iter() {
            if let Some(&day) = reminder.repeat_days.iter().find(|&&day| !(1..=7).contains(&day)) {
                return Err(StoreError::InvalidValue {
                    field: format!("reminder {} repeat day", reminder.id),
                    value: day.to_string(),
                });
            }
        }

        for note in self.notes.iter() {
            if let Some(question_id) = note.question_id {
                if !self.questions.contains(&question_id) {
                    return Err(StoreError::ValidationError(format!(
                        "note {} references missing question {}",
                        note.id, question_id
                    )));
                }
            }
        }
        Ok(())
    }
}
