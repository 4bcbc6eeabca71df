//! Named question lists: the Saved/Solved singletons and user lists.
//!
//! Saved and Solved are snapshots. They are computed from the question flags
//! the first time they are asked for and stored as ordinary lists; later flag
//! changes do not touch them until [`rebuild_special_list`] is called.

use crate::criteria::FlagCriterion;
use crate::criteria_set::CriteriaSet;
use question_store::{
    Question, QuestionFlag, QuestionId, QuestionList, QuestionStore, RecordId, Repository, Result,
    StoreError,
};

pub const SAVED_LIST_ID: &str = "saved-list-id";
pub const SOLVED_LIST_ID: &str = "solved-list-id";

/// The two lists derived from question flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialList {
    Saved,
    Solved,
}

impl SpecialList {
    pub fn id(self) -> &'static str {
        match self {
            SpecialList::Saved => SAVED_LIST_ID,
            SpecialList::Solved => SOLVED_LIST_ID,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialList::Saved => "Saved Questions",
            SpecialList::Solved => "Solved Questions",
        }
    }

    pub fn flag(self) -> QuestionFlag {
        match self {
            SpecialList::Saved => QuestionFlag::Saved,
            SpecialList::Solved => QuestionFlag::Solved,
        }
    }
}

/// Return the stored special list, materializing it on first access.
pub fn special_list(store: &mut QuestionStore, kind: SpecialList) -> QuestionList {
    if let Some(existing) = store.lists().get(&kind.id().to_string()) {
        return existing;
    }
    materialize(store, kind)
}

pub fn saved_list(store: &mut QuestionStore) -> QuestionList {
    special_list(store, SpecialList::Saved)
}

pub fn solved_list(store: &mut QuestionStore) -> QuestionList {
    special_list(store, SpecialList::Solved)
}

/// Recompute a special list from the current flags, replacing the snapshot.
pub fn rebuild_special_list(store: &mut QuestionStore, kind: SpecialList) -> QuestionList {
    materialize(store, kind)
}

fn materialize(store: &mut QuestionStore, kind: SpecialList) -> QuestionList {
    let criteria = CriteriaSet::new().add_criterion(FlagCriterion::new(kind.flag(), true));
    let question_ids: Vec<QuestionId> = criteria
        .apply(store.questions().all())
        .into_iter()
        .map(|question| question.id)
        .collect();

    let list = QuestionList {
        id: kind.id().to_string(),
        name: kind.name().to_string(),
        is_custom: true,
        question_ids,
    };
    tracing::info!(
        "Materialized {} with {} questions",
        list.name,
        list.question_ids.len()
    );
    store.lists_mut().put(list.clone());
    list
}

/// Create a user list from explicit question ids (duplicates dropped, order kept).
pub fn create_custom_list(
    store: &mut QuestionStore,
    id: impl Into<RecordId>,
    name: &str,
    question_ids: &[QuestionId],
) -> QuestionList {
    let mut ids: Vec<QuestionId> = Vec::with_capacity(question_ids.len());
    for &question_id in question_ids {
        if !ids.contains(&question_id) {
            ids.push(question_id);
        }
    }

    let list = QuestionList {
        id: id.into(),
        name: name.to_string(),
        is_custom: true,
        question_ids: ids,
    };
    store.lists_mut().put(list.clone());
    list
}

/// Append a question to a list unless it's already there.
pub fn add_to_list(
    store: &mut QuestionStore,
    list_id: &str,
    question_id: QuestionId,
) -> Result<QuestionList> {
    let mut list = find_list(store, list_id)?;
    if !list.question_ids.contains(&question_id) {
        list.question_ids.push(question_id);
        store.lists_mut().put(list.clone());
    }
    Ok(list)
}

pub fn remove_from_list(
    store: &mut QuestionStore,
    list_id: &str,
    question_id: QuestionId,
) -> Result<QuestionList> {
    let mut list = find_list(store, list_id)?;
    list.question_ids.retain(|&id| id != question_id);
    store.lists_mut().put(list.clone());
    Ok(list)
}

/// The questions of a list in list order; ids no longer in the store are skipped.
pub fn list_questions(store: &QuestionStore, list_id: &str) -> Result<Vec<Question>> {
    let list = find_list(store, list_id)?;
    Ok(list
        .question_ids
        .iter()
        .filter_map(|&id| store.question(id))
        .collect())
}

fn find_list(store: &QuestionStore, list_id: &str) -> Result<QuestionList> {
    store
        .lists()
        .get(&list_id.to_string())
        .ok_or_else(|| StoreError::not_found("QuestionList", list_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> QuestionStore {
        let mut store = QuestionStore::new();
        store.insert_questions((1..=4).map(|id| Question {
            id,
            saved: id % 2 == 0,
            solved: id == 1,
            ..Question::default()
        }));
        store
    }

    #[test]
    fn test_saved_list_materialized_once() {
        let mut store = store();
        let first = saved_list(&mut store);
        assert_eq!(first.id, SAVED_LIST_ID);
        assert_eq!(first.name, "Saved Questions");
        assert_eq!(first.question_ids, vec![2, 4]);

        let again = saved_list(&mut store);
        assert_eq!(again, first);
        assert_eq!(store.lists().len(), 1);
    }

    #[test]
    fn test_solved_list() {
        let mut store = store();
        assert_eq!(solved_list(&mut store).question_ids, vec![1]);
    }

    #[test]
    fn test_custom_list_operations() {
        let mut store = store();
        let list = create_custom_list(&mut store, "warmup", "Warm-up", &[3, 1, 3]);
        assert_eq!(list.question_ids, vec![3, 1]);

        add_to_list(&mut store, "warmup", 2).unwrap();
        add_to_list(&mut store, "warmup", 2).unwrap();
        let list = remove_from_list(&mut store, "warmup", 3).unwrap();
        assert_eq!(list.question_ids, vec![1, 2]);

        store.delete_question(1);
        let ids: Vec<u32> = list_questions(&store, "warmup")
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_missing_list() {
        let mut store = store();
        assert!(add_to_list(&mut store, "nope", 1).is_err());
        assert!(list_questions(&store, "nope").is_err());
    }
}
