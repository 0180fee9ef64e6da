use dashmap::DashSet;
use std::hash::Hash;

/// Thread-safe hash set shared between dataflow tasks.
///
/// Thin wrapper over [`DashSet`] exposing only the operations the project
/// system relies on. `add` reports whether the value was newly inserted,
/// which is how latches decide if a condition has been reported before.
#[derive(Debug)]
pub struct ConcurrentHashSet<T: Eq + Hash> {
    inner: DashSet<T>,
}

impl<T: Eq + Hash + Clone> ConcurrentHashSet<T> {
    pub fn new() -> Self {
        Self {
            inner: DashSet::new(),
        }
    }

    /// Adds `value`, returning `true` if it was not already present
    pub fn add(&self, value: T) -> bool {
        self.inner.insert(value)
    }

    /// Removes `value`, returning `true` if it was present
    pub fn remove(&self, value: &T) -> bool {
        self.inner.remove(value).is_some()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Copies the current contents out of the set.
    ///
    /// Concurrent writers may or may not be observed; no ordering is implied.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.iter().map(|entry| entry.key().clone()).collect()
    }
}

impl<T: Eq + Hash + Clone> Default for ConcurrentHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for ConcurrentHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let set = Self::new();
        for value in iter {
            set.add(value);
        }
        set
    }
}
