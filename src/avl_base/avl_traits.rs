use std::cmp::Ordering;
use std::fmt::Debug;

// Traits bound
pub trait Comparator<T> {
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

/// Compile-time knobs of an [`AvlTree`](super::avl::AvlTree).
pub trait AvlTraits: Clone + Debug {
    /// Re-check every invariant after each structural edit (debug builds only).
    const SELF_VERIFY: bool;
    /// Indentation per level of the graphic dump.
    const REPR_TAB: usize;
    /// Glyph written for an empty subtree in the graphic dump.
    const REPR_EMPTY: &'static str;
}

#[derive(Clone, Debug, Default)]
pub struct DefaultAvlTraits;

impl AvlTraits for DefaultAvlTraits {
    const SELF_VERIFY: bool = false;
    const REPR_TAB: usize = 4;
    const REPR_EMPTY: &'static str = "|";
}
