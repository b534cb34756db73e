use crate::diff::{diff, ChangeSet, Keyed};
use crate::VacancySummary;

/// Ordered, single-owner list that reports every mutation as a [`ChangeSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedList<T> {
    items: Vec<T>,
}

pub type PagedVacancyList = PagedList<VacancySummary>;

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> PagedList<T>
where
    T: Keyed + PartialEq + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends the next page. Duplicated keys are kept as delivered.
    pub fn append(&mut self, page: impl IntoIterator<Item = T>) -> ChangeSet<T> {
        let mut next = self.items.clone();
        next.extend(page);
        self.reconcile(next)
    }

    pub fn clear(&mut self) -> ChangeSet<T> {
        self.reconcile(Vec::new())
    }

    /// Reconciles to an arbitrary snapshot.
    pub fn replace(&mut self, items: Vec<T>) -> ChangeSet<T> {
        self.reconcile(items)
    }

    fn reconcile(&mut self, next: Vec<T>) -> ChangeSet<T> {
        let changes = diff(&self.items, &next);
        self.items = next;
        changes
    }
}
