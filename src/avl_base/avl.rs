use std::{
    cmp::{max, Ordering},
    fmt::{self, Write},
    marker::PhantomData,
    mem,
};

use super::{
    avl_traits::{AvlTraits, Comparator, DefaultAvlTraits},
    iter::Iter,
    node::{self, Link, Node},
    rotation::rebalance_link,
    tree_stats::TreeStats,
    OrdComparator,
};
use crate::error::{InsertError, VerifyError};

/// Outcome of [`AvlTree::insert`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Insertion<T> {
    /// The key was linked in as a new leaf.
    Inserted,
    /// An element comparing equal was already stored; nothing changed.
    /// `rejected` hands the caller's key back.
    Present { existing: T, rejected: T },
}

impl<T> Insertion<T> {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Insertion::Inserted)
    }
}

/// Height-balanced binary search tree over element handles of type `T`,
/// ordered by the comparator `C` fixed at construction.
pub struct AvlTree<T, C = OrdComparator<T>, Tr = DefaultAvlTraits> {
    root_: Link<T>,
    stats_: TreeStats,
    compar: C,
    _traits: PhantomData<Tr>,
}

/// Construction
impl<T, C, Tr> AvlTree<T, C, Tr>
where
    C: Comparator<T>,
    Tr: AvlTraits,
{
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::with_comparator(C::default())
    }

    pub fn with_comparator(compar: C) -> Self {
        Self {
            root_: None,
            stats_: TreeStats::new(),
            compar,
            _traits: PhantomData,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.compar
    }

    pub fn get_stats(&self) -> &TreeStats {
        &self.stats_
    }

    /// Releases every node. The element handles are dropped with them; data
    /// they merely point at is left alone.
    pub fn clear(&mut self) {
        if self.root_.take().is_some() {
            log::debug!("AvlTree::clear");
        }
    }
}

impl<T, C, Tr> Default for AvlTree<T, C, Tr>
where
    C: Comparator<T> + Default,
    Tr: AvlTraits,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Measures
impl<T, C, Tr> AvlTree<T, C, Tr>
where
    C: Comparator<T>,
    Tr: AvlTraits,
{
    /// Number of stored elements. Walks the whole tree.
    pub fn size(&self) -> usize {
        node::size(&self.root_)
    }

    pub fn is_empty(&self) -> bool {
        self.root_.is_none()
    }

    pub fn height(&self) -> usize {
        node::height(&self.root_) as usize
    }

    /// Length of the shortest path from the root to an empty subtree.
    pub fn distance(&self) -> usize {
        node::distance(&self.root_)
    }
}

/// Access functions querying the tree by descending from the root
impl<T, C, Tr> AvlTree<T, C, Tr>
where
    C: Comparator<T>,
    Tr: AvlTraits,
{
    /// Returns the stored element comparing equal to `key`, not `key` itself.
    pub fn search(&self, key: &T) -> Option<&T> {
        let mut link = &self.root_;
        while let Some(n) = link {
            match self.compar.compare(key, &n.element) {
                Ordering::Equal => return Some(&n.element),
                ord => link = n.child(ord),
            }
        }
        None
    }

    pub fn contains(&self, key: &T) -> bool {
        self.search(key).is_some()
    }

    pub fn first(&self) -> Option<&T> {
        let mut n = self.root_.as_deref()?;
        while let Some(l) = n.left.as_deref() {
            n = l;
        }
        Some(&n.element)
    }

    pub fn last(&self) -> Option<&T> {
        let mut n = self.root_.as_deref()?;
        while let Some(r) = n.right.as_deref() {
            n = r;
        }
        Some(&n.element)
    }

    /// Number of stored elements strictly less than `key`, i.e. the zero-based
    /// position `key` has, or would have once inserted, in sorted order.
    pub fn rank(&self, key: &T) -> usize {
        let mut rank = 0;
        let mut link = &self.root_;
        while let Some(n) = link {
            match self.compar.compare(key, &n.element) {
                Ordering::Equal => return rank + node::size(&n.left),
                Ordering::Less => link = &n.left,
                Ordering::Greater => {
                    rank += 1 + node::size(&n.left);
                    link = &n.right;
                }
            }
        }
        rank
    }

    /// Heap-style number (root = 1, left = 2n, right = 2n + 1) of the node
    /// holding `key`, or of the empty slot where it would be inserted.
    ///
    /// This reflects the current shape of the tree, not sorted order, and is
    /// meant for visualisation.
    pub fn number(&self, key: &T) -> usize {
        let mut number = 1;
        let mut link = &self.root_;
        while let Some(n) = link {
            let ord = self.compar.compare(key, &n.element);
            match ord {
                Ordering::Equal => break,
                Ordering::Less => number *= 2,
                Ordering::Greater => number = number * 2 + 1,
            }
            link = n.child(ord);
        }
        number
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root_)
    }
}

/// Insertion
impl<T, C, Tr> AvlTree<T, C, Tr>
where
    T: Clone,
    C: Comparator<T>,
    Tr: AvlTraits,
{
    /// Adds `key` at the end of its search path unless an equal element is
    /// already stored.
    ///
    /// On allocation failure the tree is left untouched and `key` comes back
    /// inside the error.
    pub fn insert(&mut self, key: T) -> Result<Insertion<T>, InsertError<T>> {
        let r = Self::insert_descend(&mut self.root_, key, &self.compar, &mut self.stats_)?;
        if r.is_inserted() {
            log::debug!("AvlTree::insert done, height {}", self.height());
            self.self_verify();
        }
        Ok(r)
    }

    /// Descends to an empty slot and links a new leaf there. Every frame that
    /// saw a new node appear below it rebalances its own slot on the way up;
    /// duplicate hits unwind without touching anything.
    fn insert_descend(
        link: &mut Link<T>,
        key: T,
        compar: &C,
        stats: &mut TreeStats,
    ) -> Result<Insertion<T>, InsertError<T>> {
        let Some(n) = link.as_mut() else {
            *link = Some(Node::try_new_leaf(key)?);
            return Ok(Insertion::Inserted);
        };

        let ord = compar.compare(&key, &n.element);
        if ord == Ordering::Equal {
            return Ok(Insertion::Present {
                existing: n.element.clone(),
                rejected: key,
            });
        }

        let r = Self::insert_descend(n.child_mut(ord), key, compar, stats)?;
        if r.is_inserted() {
            stats.record(rebalance_link(link));
        }
        Ok(r)
    }
}

/// Erase
impl<T, C, Tr> AvlTree<T, C, Tr>
where
    C: Comparator<T>,
    Tr: AvlTraits,
{
    /// Removes the element comparing equal to `key` and returns it.
    ///
    /// A node with a left subtree takes over the maximum of that subtree
    /// instead of being unlinked.
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let removed = Self::remove_descend(&mut self.root_, key, &self.compar, &mut self.stats_)?;
        log::debug!("AvlTree::remove done, height {}", self.height());
        self.self_verify();
        Some(removed)
    }

    fn remove_descend(
        link: &mut Link<T>,
        key: &T,
        compar: &C,
        stats: &mut TreeStats,
    ) -> Option<T> {
        let n = link.as_mut()?;
        let removed = match compar.compare(key, &n.element) {
            Ordering::Equal => return Self::remove_root(link, stats),
            ord => Self::remove_descend(n.child_mut(ord), key, compar, stats)?,
        };
        stats.record(rebalance_link(link));
        Some(removed)
    }

    /// Takes the element out of the non-empty subtree `link`.
    fn remove_root(link: &mut Link<T>, stats: &mut TreeStats) -> Option<T> {
        let n = link.as_mut()?;
        if n.left.is_none() {
            let Node { right, element, .. } = *link.take()?;
            *link = right;
            return Some(element);
        }

        let max = Self::remove_max(&mut n.left, stats)?;
        let removed = mem::replace(&mut n.element, max);
        stats.record(rebalance_link(link));
        Some(removed)
    }

    /// Unlinks the rightmost node of the non-empty subtree `link`.
    fn remove_max(link: &mut Link<T>, stats: &mut TreeStats) -> Option<T> {
        let n = link.as_mut()?;
        if n.right.is_none() {
            let Node { left, element, .. } = *link.take()?;
            *link = left;
            return Some(element);
        }

        let max = Self::remove_max(&mut n.right, stats)?;
        stats.record(rebalance_link(link));
        Some(max)
    }
}

/// Verification
impl<T, C, Tr> AvlTree<T, C, Tr>
where
    C: Comparator<T>,
    Tr: AvlTraits,
{
    /// Checks cached heights, the balance factor of every node and that the
    /// in-order sequence is strictly increasing under the comparator.
    pub fn verify(&self) -> Result<(), VerifyError> {
        Self::verify_node(&self.root_)?;

        let mut prev: Option<&T> = None;
        for (position, e) in self.iter().enumerate() {
            if let Some(p) = prev {
                if self.compar.compare(p, e) != Ordering::Less {
                    return Err(VerifyError::OutOfOrder { position });
                }
            }
            prev = Some(e);
        }
        Ok(())
    }

    /// Returns the actual height of `link`.
    fn verify_node(link: &Link<T>) -> Result<u32, VerifyError> {
        let Some(n) = link else {
            return Ok(0);
        };
        let lh = Self::verify_node(&n.left)?;
        let rh = Self::verify_node(&n.right)?;
        let actual = 1 + max(lh, rh);
        if n.height != actual {
            return Err(VerifyError::HeightMismatch {
                cached: n.height,
                actual,
            });
        }
        let balance = lh as i32 - rh as i32;
        if !(-1..=1).contains(&balance) {
            return Err(VerifyError::Unbalanced { balance });
        }
        Ok(actual)
    }

    fn self_verify(&self) {
        if Tr::SELF_VERIFY {
            debug_assert!(
                self.verify().is_ok(),
                "AvlTree invariant broken: {:?}",
                self.verify()
            );
        }
    }
}

/// Debug
impl<T, C, Tr> AvlTree<T, C, Tr>
where
    Tr: AvlTraits,
{
    /// Draws the tree turned a quarter turn anticlockwise: right subtrees
    /// above their parent, left subtrees below, `Tr::REPR_TAB` columns per
    /// level. Each element is written by `put` and followed by its height and
    /// balance factor; empty subtrees are drawn as `Tr::REPR_EMPTY`.
    pub fn write_graphic<W, F>(&self, out: &mut W, mut put: F) -> fmt::Result
    where
        W: Write,
        F: FnMut(&mut W, &T) -> fmt::Result,
    {
        Self::repr_graphic(&self.root_, out, &mut put, 0)
    }

    fn repr_graphic<W, F>(link: &Link<T>, out: &mut W, put: &mut F, level: usize) -> fmt::Result
    where
        W: Write,
        F: FnMut(&mut W, &T) -> fmt::Result,
    {
        let indent = Tr::REPR_TAB * level;
        let Some(n) = link else {
            return writeln!(out, "{:indent$}{}", "", Tr::REPR_EMPTY);
        };

        Self::repr_graphic(&n.right, out, put, level + 1)?;
        write!(out, "{:indent$}", "")?;
        put(out, &n.element)?;
        writeln!(out, " h={} b={}", n.height, n.balance())?;
        Self::repr_graphic(&n.left, out, put, level + 1)
    }
}

/// Display
impl<T, C, Tr> fmt::Debug for AvlTree<T, C, Tr>
where
    T: fmt::Debug,
    Tr: AvlTraits,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_graphic(f, |f, e| write!(f, "{:?}", e))
    }
}

impl<'a, T, C, Tr> IntoIterator for &'a AvlTree<T, C, Tr>
where
    C: Comparator<T>,
    Tr: AvlTraits,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
