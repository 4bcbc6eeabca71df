//! Repository interface over keyed records, plus the in-memory table
//! that backs [`QuestionStore`](crate::QuestionStore).

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// A value that can live in a repository under a stable key.
pub trait Record: Clone + Send + Sync {
    type Key: Ord + Clone + Debug + Send + Sync;

    fn key(&self) -> Self::Key;
}

/// Predicate handed to [`Repository::query`] and [`Repository::count`].
pub type Predicate<'a, T> = &'a (dyn Fn(&T) -> bool + Sync);

/// Keyed storage of records.
///
/// Reads return owned clones so callers never hold a borrow into the store.
/// Queries return records in key order.
pub trait Repository<T: Record> {
    fn get(&self, key: &T::Key) -> Option<T>;

    /// Insert or replace; returns the previous record under the same key.
    fn put(&mut self, record: T) -> Option<T>;

    fn query(&self, predicate: Predicate<'_, T>) -> Vec<T>;

    /// Number of records matching `predicate`, without cloning them.
    fn count(&self, predicate: Predicate<'_, T>) -> usize;

    /// Removing a missing key is not an error; it returns `None`.
    fn delete(&mut self, key: &T::Key) -> Option<T>;

    fn all(&self) -> Vec<T> {
        self.query(&|_| true)
    }

    fn len(&self) -> usize {
        self.count(&|_| true)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered in-memory table.
#[derive(Debug, Clone)]
pub struct Table<T: Record> {
    rows: BTreeMap<T::Key, T>,
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    pub fn from_records(records: impl IntoIterator<Item = T>) -> Self {
        Self {
            rows: records
                .into_iter()
                .map(|record| (record.key(), record))
                .collect(),
        }
    }

    /// Borrowing iteration in key order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.rows.contains_key(key)
    }

    pub(crate) fn get_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        self.rows.get_mut(key)
    }
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Repository<T> for Table<T> {
    fn get(&self, key: &T::Key) -> Option<T> {
        self.rows.get(key).cloned()
    }

    fn put(&mut self, record: T) -> Option<T> {
        self.rows.insert(record.key(), record)
    }

    fn query(&self, predicate: Predicate<'_, T>) -> Vec<T> {
        self.rows
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    fn count(&self, predicate: Predicate<'_, T>) -> usize {
        self.rows
            .par_iter()
            .filter(|(_, record)| predicate(record))
            .count()
    }

    fn delete(&mut self, key: &T::Key) -> Option<T> {
        self.rows.remove(key)
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}
