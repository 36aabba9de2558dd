//! Registry of tracked roots and their pointer listeners.
//!
//! Each tracked root owns exactly one listener handle. The browser layer
//! stores its event closures here so that disabling the widget can detach
//! every listener it attached, and nothing else.

#[cfg(test)]
#[path = "listeners_test.rs"]
mod listeners_test;

/// Map from tracked root to listener handle.
///
/// Roots are compared with `PartialEq`; DOM handles are not hashable, and a page
/// tracks a handful of roots at most.
#[derive(Debug)]
pub struct ListenerRegistry<K, L> {
    entries: Vec<(K, L)>,
}

impl<K, L> Default for ListenerRegistry<K, L> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: PartialEq, L> ListenerRegistry<K, L> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `root` with `listener`. Returns the listener it replaces, if any.
    pub fn track(&mut self, root: K, listener: L) -> Option<L> {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == root) {
            return Some(std::mem::replace(&mut entry.1, listener));
        }
        self.entries.push((root, listener));
        None
    }

    /// Stop tracking `root`, handing back its listener for detaching.
    pub fn untrack(&mut self, root: &K) -> Option<L> {
        let index = self.entries.iter().position(|(k, _)| k == root)?;
        Some(self.entries.remove(index).1)
    }

    #[must_use]
    pub fn is_tracked(&self, root: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == root)
    }

    #[must_use]
    pub fn get(&self, root: &K) -> Option<&L> {
        self.entries.iter().find(|(k, _)| k == root).map(|(_, l)| l)
    }

    /// Tracked roots in tracking order.
    pub fn roots(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Remove every entry, oldest first.
    pub fn drain(&mut self) -> std::vec::Drain<'_, (K, L)> {
        self.entries.drain(..)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
