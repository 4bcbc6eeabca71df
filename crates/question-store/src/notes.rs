//! Note editing on top of the store.
//!
//! A question's note lives in two places: the question's own `note` field
//! (what the detail view shows) and a [`Note`] record (what the notes list
//! shows). Both are updated together here.

use crate::error::{Result, StoreError};
use crate::repository::Repository;
use crate::store::QuestionStore;
use crate::types::*;
use chrono::{DateTime, Utc};

impl QuestionStore {
    /// Save the note of a question and upsert its linked note record.
    pub fn update_note(
        &mut self,
        question_id: QuestionId,
        content: &str,
        language: Language,
        now: DateTime<Utc>,
    ) -> Result<Note> {
        let question = self
            .questions
            .get_mut(&question_id)
            .ok_or_else(|| StoreError::not_found("Question", question_id))?;
        question.note = content.to_string();
        question.note_language = language;

        let note = Note {
            id: Note::id_for_question(question_id),
            content: content.to_string(),
            language,
            last_updated: now,
            question_id: Some(question_id),
        };
        self.notes.put(note.clone());
        Ok(note)
    }

    pub fn note_for_question(&self, question_id: QuestionId) -> Option<Note> {
        self.notes.get(&Note::id_for_question(question_id))
    }

    /// All notes, most recently updated first.
    pub fn notes_by_recency(&self) -> Vec<Note> {
        let mut notes = self.notes.all();
        notes.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        notes
    }

    /// Delete a note. Missing ids are ignored.
    pub fn delete_note(&mut self, id: &str) -> Option<Note> {
        let removed = self.notes.delete(&id.to_string())?;
        if let Some(question) = removed
            .question_id
            .and_then(|question_id| self.questions.get_mut(&question_id))
        {
            question.note.clear();
        }
        Some(removed)
    }
}
