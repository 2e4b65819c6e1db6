use std::fmt::Debug;

use super::node::{Link, Node};

/// In-order iterator over the elements of an [`AvlTree`](super::avl::AvlTree).
///
/// Holds the path of nodes whose element has not been yielded yet; its depth
/// never exceeds the tree height.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Link<T>) -> Self {
        let mut it = Self {
            stack: Vec::with_capacity(root.as_ref().map_or(0, |n| n.height as usize)),
        };
        it.push_left_spine(root);
        it
    }

    fn push_left_spine(&mut self, mut link: &'a Link<T>) {
        while let Some(n) = link {
            self.stack.push(n);
            link = &n.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left_spine(&n.right);
        Some(&n.element)
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, T: Debug> Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
