//! Core domain types for the question library.
//!
//! Everything here is a plain value type. Records are owned by the
//! [`QuestionStore`](crate::QuestionStore) tables and handed out as clones.

use crate::question_filter::QuestionFilter;
use crate::repository::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a question (the problem number)
pub type QuestionId = u32;

/// Identifier of a saved list, reminder or note
pub type RecordId = String;

// =============================================================================
// Question-related Types
// =============================================================================

/// Difficulty of a question. The discriminant is the rank used by filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    #[default]
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
    ];

    pub fn rank(self) -> i32 {
        self as i32
    }

    /// Returns `None` for ranks that don't name a level.
    pub fn from_rank(rank: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.rank() == rank)
    }

    pub fn title(self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard => "Hard",
        }
    }

    /// Parse a selection key: either a title ("easy", "Hard") or a numeric rank.
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        if let Ok(rank) = key.parse::<i32>() {
            return Self::from_rank(rank);
        }
        Self::ALL
            .into_iter()
            .find(|level| level.title().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Boolean flags carried by every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionFlag {
    Read,
    Solved,
    Saved,
    TopLiked,
    TopInterview,
}

impl QuestionFlag {
    pub fn name(self) -> &'static str {
        match self {
            QuestionFlag::Read => "read",
            QuestionFlag::Solved => "solved",
            QuestionFlag::Saved => "saved",
            QuestionFlag::TopLiked => "top-liked",
            QuestionFlag::TopInterview => "top-interview",
        }
    }
}

/// Language tag attached to notes and solutions.
///
/// Only used to pick a highlighting grammar; it has no effect on filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    C,
    CSharp,
    Cpp,
    Go,
    Java,
    Javascript,
    #[default]
    Markdown,
    ObjectiveC,
    Php,
    Python,
    Ruby,
    Swift,
}

impl Language {
    pub const ALL: [Language; 12] = [
        Language::C,
        Language::CSharp,
        Language::Cpp,
        Language::Go,
        Language::Java,
        Language::Javascript,
        Language::Markdown,
        Language::ObjectiveC,
        Language::Php,
        Language::Python,
        Language::Ruby,
        Language::Swift,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Language::C => "C",
            Language::CSharp => "C#",
            Language::Cpp => "C++",
            Language::Go => "Go",
            Language::Java => "Java",
            Language::Javascript => "Javascript",
            Language::Markdown => "Markdown",
            Language::ObjectiveC => "Objective-C",
            Language::Php => "PHP",
            Language::Python => "Python",
            Language::Ruby => "Ruby",
            Language::Swift => "Swift",
        }
    }

    /// Grammar name understood by the syntax highlighter.
    pub fn highlighter_tag(self) -> String {
        match self {
            Language::ObjectiveC => "objectivec".to_string(),
            Language::CSharp => "cs".to_string(),
            other => other.display_name().to_lowercase(),
        }
    }

    /// Case-insensitive lookup by display name or highlighter tag.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|language| {
            language.display_name().eq_ignore_ascii_case(name)
                || language.highlighter_tag().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A practice question.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub content: String,
    pub tags: BTreeSet<String>,
    pub difficulty_level: DifficultyLevel,
    pub companies: BTreeSet<String>,
    pub read: bool,
    pub solved: bool,
    pub saved: bool,
    pub top_liked: bool,
    pub top_interview: bool,
    pub note: String,
    pub note_language: Language,
}

impl Question {
    pub fn flag(&self, flag: QuestionFlag) -> bool {
        match flag {
            QuestionFlag::Read => self.read,
            QuestionFlag::Solved => self.solved,
            QuestionFlag::Saved => self.saved,
            QuestionFlag::TopLiked => self.top_liked,
            QuestionFlag::TopInterview => self.top_interview,
        }
    }

    pub fn set_flag(&mut self, flag: QuestionFlag, value: bool) {
        match flag {
            QuestionFlag::Read => self.read = value,
            QuestionFlag::Solved => self.solved = value,
            QuestionFlag::Saved => self.saved = value,
            QuestionFlag::TopLiked => self.top_liked = value,
            QuestionFlag::TopInterview => self.top_interview = value,
        }
    }
}

impl Record for Question {
    type Key = QuestionId;

    fn key(&self) -> QuestionId {
        self.id
    }
}

/// A topic tag such as "dynamic-programming".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// A company known to ask a question.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
}

/// Every tag and company name used by the stored questions, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Vocabulary {
    pub tags: Vec<String>,
    pub companies: Vec<String>,
}

impl Vocabulary {
    pub fn tags(&self) -> Vec<Tag> {
        self.tags.iter().map(|name| Tag { name: name.clone() }).collect()
    }

    pub fn companies(&self) -> Vec<Company> {
        self.companies
            .iter()
            .map(|name| Company { name: name.clone() })
            .collect()
    }
}

// =============================================================================
// Lists, Reminders, Notes
// =============================================================================

/// A named, ordered collection of question ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionList {
    pub id: RecordId,
    pub name: String,
    pub is_custom: bool,
    pub question_ids: Vec<QuestionId>,
}

impl Record for QuestionList {
    type Key = RecordId;

    fn key(&self) -> RecordId {
        self.id.clone()
    }
}

/// Day numbers follow the calendar convention 1 = Sunday ... 7 = Saturday.
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A scheduled practice reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: RecordId,
    pub date: DateTime<Utc>,
    /// Empty means one-time.
    pub repeat_days: BTreeSet<u8>,
    pub enabled: bool,
    pub filter: Option<QuestionFilter>,
}

impl Reminder {
    pub fn is_repeating(&self) -> bool {
        !self.repeat_days.is_empty()
    }

    pub fn repeat_description(&self) -> String {
        let days: Vec<u8> = self.repeat_days.iter().copied().collect();
        match days.as_slice() {
            [] => "Once".to_string(),
            [1, 2, 3, 4, 5, 6, 7] => "Every day".to_string(),
            [2, 3, 4, 5, 6] => "Weekdays".to_string(),
            [1, 7] => "Weekends".to_string(),
            _ => days
                .iter()
                .filter_map(|&day| WEEKDAY_NAMES.get(usize::from(day).wrapping_sub(1)))
                .copied()
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl Record for Reminder {
    type Key = RecordId;

    fn key(&self) -> RecordId {
        self.id.clone()
    }
}

/// Free-text note, either attached to one question or standalone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: RecordId,
    pub content: String,
    pub language: Language,
    pub last_updated: DateTime<Utc>,
    pub question_id: Option<QuestionId>,
}

impl Note {
    /// Id of the note linked to a question.
    pub fn id_for_question(question_id: QuestionId) -> RecordId {
        format!("note-{}", question_id)
    }
}

impl Record for Note {
    type Key = RecordId;

    fn key(&self) -> RecordId {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(DifficultyLevel::parse("easy"), Some(DifficultyLevel::Easy));
        assert_eq!(DifficultyLevel::parse("Hard"), Some(DifficultyLevel::Hard));
        assert_eq!(DifficultyLevel::parse("2"), Some(DifficultyLevel::Medium));
        assert_eq!(DifficultyLevel::parse("9"), None);
        assert_eq!(DifficultyLevel::parse("insane"), None);
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::ObjectiveC.highlighter_tag(), "objectivec");
        assert_eq!(Language::CSharp.highlighter_tag(), "cs");
        assert_eq!(Language::Cpp.highlighter_tag(), "c++");
        assert_eq!(Language::parse("python"), Some(Language::Python));
        assert_eq!(Language::parse("objectivec"), Some(Language::ObjectiveC));
        assert_eq!(Language::default(), Language::Markdown);
    }

    #[test]
    fn test_question_deserializes_with_defaults() {
        let json = r#"{"id": 70, "title": "Climbing Stairs", "tags": ["dp"],
                       "difficultyLevel": "easy"}"#;
        let question: Question = serde_json::from_str(json).unwrap();

        assert_eq!(question.id, 70);
        assert!(question.tags.contains("dp"));
        assert!(!question.saved);
        assert_eq!(question.note_language, Language::Markdown);
    }

    #[test]
    fn test_vocabulary_entries() {
        let vocabulary = Vocabulary {
            tags: vec!["dp".to_string(), "graph".to_string()],
            companies: vec!["Google".to_string()],
        };
        assert_eq!(
            vocabulary.tags(),
            vec![
                Tag { name: "dp".to_string() },
                Tag { name: "graph".to_string() }
            ]
        );
        assert_eq!(vocabulary.companies()[0].name, "Google");
    }

    #[test]
    fn test_repeat_description() {
        let mut reminder = Reminder {
            id: "r1".to_string(),
            date: Utc::now(),
            repeat_days: BTreeSet::new(),
            enabled: true,
            filter: None,
        };
        assert_eq!(reminder.repeat_description(), "Once");

        reminder.repeat_days = (2..=6).collect();
        assert_eq!(reminder.repeat_description(), "Weekdays");

        reminder.repeat_days = [2, 4].into_iter().collect();
        assert_eq!(reminder.repeat_description(), "Mon, Wed");

        reminder.repeat_days = (1..=7).collect();
        assert_eq!(reminder.repeat_description(), "Every day");
    }
}
