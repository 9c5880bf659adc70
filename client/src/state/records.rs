//! Cached admin collections and their invalidation counters.
//!
//! DESIGN
//! ======
//! Collections are never patched in place after a mutation. A successful
//! mutation bumps the generation of its own collection, and whatever lists
//! that collection refetches when the generation changes.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

/// Identifies one cached collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    AdminProducts,
    Categories,
}

impl CollectionKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdminProducts => "admin-products",
            Self::Categories => "categories",
        }
    }
}

/// Generation counters, one per collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordCache {
    admin_products: u64,
    categories: u64,
}

impl RecordCache {
    #[must_use]
    pub fn generation(&self, key: CollectionKey) -> u64 {
        match key {
            CollectionKey::AdminProducts => self.admin_products,
            CollectionKey::Categories => self.categories,
        }
    }

    /// Mark a collection stale so its readers refetch.
    pub fn invalidate(&mut self, key: CollectionKey) {
        let slot = match key {
            CollectionKey::AdminProducts => &mut self.admin_products,
            CollectionKey::Categories => &mut self.categories,
        };
        *slot = slot.wrapping_add(1);
    }
}

/// A fetched collection as shown by a list view.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self { items: Vec::new(), loading: true, error: None }
    }
}

impl<T> CollectionState<T> {
    /// Record the start of a (re)fetch. Items already shown stay visible.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    pub fn finish(&mut self, result: Result<Vec<T>, String>) {
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
        self.loading = false;
    }
}
