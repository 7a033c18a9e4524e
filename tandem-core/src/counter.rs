use std::collections::HashMap;
use tokio::sync::Mutex;

/// A string-keyed counter that is safe to share between tasks.
///
/// Every operation takes the one lock for its whole duration, and no
/// operation calls another while holding it.
#[derive(Debug, Default)]
pub struct SafeCounter {
    counts: Mutex<HashMap<String, usize>>,
}

impl SafeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `key`. Absent keys start at zero.
    pub async fn increment(&self, key: &str) {
        let mut counts = self.counts.lock().await;
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }

    /// Current count for `key`, zero if it was never incremented.
    pub async fn value(&self, key: &str) -> usize {
        let counts = self.counts.lock().await;
        counts.get(key).copied().unwrap_or(0)
    }

    /// Visit-and-mark: returns `true` and records the key if its count is
    /// zero, otherwise returns `false` and leaves it untouched.
    pub async fn visit(&self, key: &str) -> bool {
        let mut counts = self.counts.lock().await;
        let count = counts.entry(key.to_string()).or_insert(0);
        if *count == 0 {
            *count = 1;
            true
        } else {
            false
        }
    }

    pub async fn snapshot(&self) -> HashMap<String, usize> {
        self.counts.lock().await.clone()
    }

    /// Number of keys with a recorded count.
    pub async fn len(&self) -> usize {
        self.counts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.counts.lock().await.is_empty()
    }
}
