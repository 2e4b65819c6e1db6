use crate::{
    avl_base::{
        avl::{AvlTree, Insertion},
        avl_traits::{Comparator, DefaultAvlTraits},
        iter::Iter,
        OrdComparator,
    },
    error::InsertError,
};

/// Ordered set of element handles backed by an [`AvlTree`].
pub struct AvlSet<T, C = OrdComparator<T>> {
    _tree: AvlTree<T, C, DefaultAvlTraits>,
}

impl<T, C> AvlSet<T, C>
where
    C: Comparator<T>,
{
    pub fn with_comparator(compar: C) -> Self {
        Self {
            _tree: AvlTree::with_comparator(compar),
        }
    }

    pub fn is_empty(&self) -> bool {
        self._tree.is_empty()
    }

    pub fn len(&self) -> usize {
        self._tree.size()
    }

    pub fn height(&self) -> usize {
        self._tree.height()
    }

    pub fn contains(&self, value: &T) -> bool {
        self._tree.contains(value)
    }

    /// Returns the stored handle equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        self._tree.search(value)
    }

    pub fn rank(&self, value: &T) -> usize {
        self._tree.rank(value)
    }

    pub fn first(&self) -> Option<&T> {
        self._tree.first()
    }

    pub fn last(&self) -> Option<&T> {
        self._tree.last()
    }

    pub fn remove(&mut self, value: &T) -> Option<T> {
        self._tree.remove(value)
    }

    pub fn clear(&mut self) {
        self._tree.clear()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self._tree.iter()
    }

    pub fn as_tree(&self) -> &AvlTree<T, C, DefaultAvlTraits> {
        &self._tree
    }
}

impl<T, C> AvlSet<T, C>
where
    T: Clone,
    C: Comparator<T>,
{
    /// Returns `Ok(true)` if `value` was not present yet.
    pub fn insert(&mut self, value: T) -> Result<bool, InsertError<T>> {
        Ok(matches!(self._tree.insert(value)?, Insertion::Inserted))
    }
}

impl<T, C> AvlSet<T, C>
where
    C: Comparator<T> + Default,
{
    pub fn new() -> Self {
        Self {
            _tree: AvlTree::new(),
        }
    }
}

impl<T, C> Default for AvlSet<T, C>
where
    C: Comparator<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, C> IntoIterator for &'a AvlSet<T, C>
where
    C: Comparator<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub type DefaultAvlSet<T> = AvlSet<T, OrdComparator<T>>;
