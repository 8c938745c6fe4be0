use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use tokio::sync::RwLock;

/// Id-keyed rows guarded by a lock, with ids handed out by an atomic counter.
///
/// Every operation touches the map exactly once; nothing spans two calls.
#[derive(Debug)]
pub struct MemoryStore<T> {
    rows: RwLock<BTreeMap<i32, T>>,
    next_id: AtomicI32,
}

impl<T: Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    /// Pre-populated store; the counter continues after the highest seeded id.
    pub fn with_rows(rows: impl IntoIterator<Item = (i32, T)>) -> Self {
        let rows: BTreeMap<i32, T> = rows.into_iter().collect();
        let next = rows.keys().next_back().copied().unwrap_or(0) + 1;
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicI32::new(next),
        }
    }

    pub async fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(i32) -> T,
    {
        let mut rows = self.rows.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = build(id);
        rows.insert(id, row.clone());
        row
    }

    /// Inserts unless an existing row satisfies `conflicts`; the check and the
    /// insert happen under one write lock.
    pub async fn insert_unique<C, F>(&self, conflicts: C, build: F) -> Option<T>
    where
        C: Fn(&T) -> bool,
        F: FnOnce(i32) -> T,
    {
        let mut rows = self.rows.write().await;
        if rows.values().any(conflicts) {
            return None;
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = build(id);
        rows.insert(id, row.clone());
        Some(row)
    }

    /// Replaces an existing row; unknown ids leave the store untouched.
    pub async fn replace(&self, id: i32, row: T) -> bool {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: i32) -> bool {
        self.rows.write().await.remove(&id).is_some()
    }

    pub async fn get(&self, id: i32) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    pub async fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows.read().await.values().find(|&row| predicate(row)).cloned()
    }

    pub async fn all(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }
}
