pub mod avl;
pub mod avl_traits;
pub mod iter;
mod node;
mod rotation;
pub mod tree_stats;

use self::avl_traits::Comparator;
use std::{cmp::Ordering, marker::PhantomData};

pub use self::rotation::RebalanceFlags;

/// Orders elements by their own [`Ord`] implementation.
#[derive(Clone, Debug)]
pub struct OrdComparator<T> {
    _t: PhantomData<T>,
}

impl<T> OrdComparator<T> {
    pub fn new() -> Self {
        Self { _t: PhantomData }
    }
}

impl<T> Default for OrdComparator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Comparator<T> for OrdComparator<T>
where
    T: Ord,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}
