//! Generic ordered collection shared by the handle and provider sequences.

use std::collections::HashSet;
use std::sync::Arc;

/// Trait for items that can be stored in an [`OrderedSet`].
pub trait Registerable: Send + Sync {
    /// Identity used in error messages.
    fn registry_id(&self) -> &str;

    /// Ascending sort key.
    fn sort_key(&self) -> i64;
}

/// The same `Arc` was supplied more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate(pub String);

/// Immutable sequence sorted ascending by [`Registerable::sort_key`].
///
/// Sorting is stable, so items sharing a key keep their input order. Identity
/// is pointer identity: two distinct instances with equal ids are both kept.
pub struct OrderedSet<T: ?Sized + Registerable> {
    items: Vec<Arc<T>>,
}

impl<T: ?Sized + Registerable> OrderedSet<T> {
    /// Build the set, rejecting the first `Arc` seen twice.
    pub fn build(items: impl IntoIterator<Item = Arc<T>>) -> Result<Self, Duplicate> {
        let mut seen = HashSet::new();
        let mut items: Vec<Arc<T>> = items.into_iter().collect();

        for item in &items {
            let addr = Arc::as_ptr(item).cast::<()>() as usize;
            if !seen.insert(addr) {
                return Err(Duplicate(item.registry_id().to_string()));
            }
        }

        items.sort_by_key(|item| item.sort_key());
        Ok(Self { items })
    }

    /// Create an empty set.
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub fn as_slice(&self) -> &[Arc<T>] {
        &self.items
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Arc<T>> + '_ {
        self.items.iter()
    }

    /// Ids in sorted order.
    pub fn ids(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.registry_id().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: ?Sized + Registerable> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[path = "base_tests.rs"]
mod tests;
