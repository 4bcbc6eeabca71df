//! The QuestionStore aggregate: every table the app persists, plus the live
//! tag/company vocabulary feed.

use crate::error::{Result, StoreError};
use crate::repository::{Repository, Table};
use crate::types::*;
use std::collections::BTreeSet;
use tokio::sync::watch;

/// Process-local store of questions, lists, reminders and notes.
///
/// Questions are only mutated through the store's own methods so the
/// vocabulary feed stays in sync with the question table. The other tables
/// are plain repositories and are exposed mutably.
#[derive(Debug)]
pub struct QuestionStore {
    pub(crate) questions: Table<Question>,
    pub(crate) lists: Table<QuestionList>,
    pub(crate) reminders: Table<Reminder>,
    pub(crate) notes: Table<Note>,
    vocabulary: watch::Sender<Vocabulary>,
}

impl QuestionStore {
    /// Creates a new, empty store
    pub fn new() -> Self {
        let (vocabulary, _) = watch::channel(Vocabulary::default());
        Self {
            questions: Table::new(),
            lists: Table::new(),
            reminders: Table::new(),
            notes: Table::new(),
            vocabulary,
        }
    }

    pub(crate) fn from_tables(
        questions: Table<Question>,
        lists: Table<QuestionList>,
        reminders: Table<Reminder>,
        notes: Table<Note>,
    ) -> Self {
        let store = Self {
            questions,
            lists,
            reminders,
            notes,
            ..Self::new()
        };
        store.refresh_vocabulary();
        store
    }

    // Read access

    pub fn questions(&self) -> &Table<Question> {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<Question> {
        self.questions.get(&id)
    }

    pub fn lists(&self) -> &Table<QuestionList> {
        &self.lists
    }

    pub fn reminders(&self) -> &Table<Reminder> {
        &self.reminders
    }

    pub fn notes(&self) -> &Table<Note> {
        &self.notes
    }

    pub fn lists_mut(&mut self) -> &mut Table<QuestionList> {
        &mut self.lists
    }

    pub fn reminders_mut(&mut self) -> &mut Table<Reminder> {
        &mut self.reminders
    }

    pub fn notes_mut(&mut self) -> &mut Table<Note> {
        &mut self.notes
    }

    /// Current tag and company vocabulary.
    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary.borrow().clone()
    }

    /// Receiver that observes every vocabulary change made through this store.
    pub fn subscribe_vocabulary(&self) -> watch::Receiver<Vocabulary> {
        self.vocabulary.subscribe()
    }

    /// Counts of (questions, lists, reminders, notes)
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.questions.len(),
            self.lists.len(),
            self.reminders.len(),
            self.notes.len(),
        )
    }

    // Question mutation

    /// Insert or replace a question.
    pub fn put_question(&mut self, question: Question) -> Option<Question> {
        let previous = self.questions.put(question);
        self.refresh_vocabulary();
        previous
    }

    /// Bulk import; the vocabulary feed fires once at the end.
    ///
    /// A question already in the store keeps its flags and note; only the
    /// catalogue fields are replaced.
    pub fn insert_questions(&mut self, questions: impl IntoIterator<Item = Question>) -> usize {
        let mut inserted = 0;
        for mut question in questions {
            if let Some(existing) = self.questions.get_mut(&question.id) {
                question.read = existing.read;
                question.solved = existing.solved;
                question.saved = existing.saved;
                question.note = std::mem::take(&mut existing.note);
                question.note_language = existing.note_language;
            }
            self.questions.put(question);
            inserted += 1;
        }
        self.refresh_vocabulary();
        inserted
    }

    /// Remove a question together with its linked note.
    pub fn delete_question(&mut self, id: QuestionId) -> Option<Question> {
        let removed = self.questions.delete(&id);
        if removed.is_some() {
            self.notes.delete(&Note::id_for_question(id));
            self.refresh_vocabulary();
        }
        removed
    }

    /// Flip a flag (mark read/solved/saved) and return its new value.
    pub fn toggle_flag(&mut self, id: QuestionId, flag: QuestionFlag) -> Result<bool> {
        let question = self
            .questions
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Question", id))?;
        let value = !question.flag(flag);
        question.set_flag(flag, value);
        tracing::debug!("Question {} {} -> {}", id, flag.name(), value);
        Ok(value)
    }

    fn refresh_vocabulary(&self) {
        let mut tags = BTreeSet::new();
        let mut companies = BTreeSet::new();
        for question in self.questions.iter() {
            tags.extend(question.tags.iter().cloned());
            companies.extend(question.companies.iter().cloned());
        }
        let next = Vocabulary {
            tags: tags.into_iter().collect(),
            companies: companies.into_iter().collect(),
        };

        self.vocabulary.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

impl Default for QuestionStore {
    fn default() -> Self {
        Self::new()
    }
}
