use std::{
    alloc::{alloc, Layout},
    cmp::{max, min, Ordering},
};

use crate::error::{AllocError, InsertError};

pub type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug)]
pub struct Node<T> {
    pub left: Link<T>,
    pub right: Link<T>,
    pub element: T,
    pub height: u32,
}

impl<T> Node<T> {
    fn leaf(element: T) -> Self {
        Self {
            left: None,
            right: None,
            element,
            height: 1,
        }
    }

    /// Allocates a fresh leaf holding `element`.
    ///
    /// Unlike `Box::new` this reports exhaustion instead of aborting, so the
    /// insert path can hand the failure and `element` back to the caller.
    pub fn try_new_leaf(element: T) -> Result<Box<Self>, InsertError<T>> {
        let layout = Layout::new::<Self>();
        // Node always carries a u32 height, so the layout is never zero-sized.
        let ptr = unsafe { alloc(layout) } as *mut Self;
        if ptr.is_null() {
            log::warn!("Node::try_new_leaf: allocation of {} bytes failed", layout.size());
            return Err(InsertError {
                error: AllocError {
                    size: layout.size(),
                },
                rejected: element,
            });
        }
        unsafe {
            ptr.write(Self::leaf(element));
            Ok(Box::from_raw(ptr))
        }
    }

    #[inline]
    pub fn update_height(&mut self) {
        self.height = 1 + max(height(&self.left), height(&self.right));
    }

    #[inline]
    pub fn balance(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }

    /// The subtree a search for something ordered `ord` against this node
    /// continues into.
    #[inline]
    pub fn child(&self, ord: Ordering) -> &Link<T> {
        if ord == Ordering::Less {
            &self.left
        } else {
            &self.right
        }
    }

    #[inline]
    pub fn child_mut(&mut self, ord: Ordering) -> &mut Link<T> {
        if ord == Ordering::Less {
            &mut self.left
        } else {
            &mut self.right
        }
    }
}

#[inline]
pub fn height<T>(link: &Link<T>) -> u32 {
    link.as_ref().map_or(0, |n| n.height)
}

#[inline]
pub fn balance<T>(link: &Link<T>) -> i32 {
    link.as_ref().map_or(0, |n| n.balance())
}

pub fn size<T>(link: &Link<T>) -> usize {
    match link {
        None => 0,
        Some(n) => 1 + size(&n.left) + size(&n.right),
    }
}

/// Length of the shortest path from `link` down to an empty subtree.
pub fn distance<T>(link: &Link<T>) -> usize {
    match link {
        None => 0,
        Some(n) => 1 + min(distance(&n.left), distance(&n.right)),
    }
}
