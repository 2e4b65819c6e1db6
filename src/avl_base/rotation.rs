use bitmask_enum::bitmask;

use super::node::{balance, Link, Node};

/// What a call to [`rebalance`] did to the subtree it was handed.
///
/// A double rotation reports both directions plus `Double`.
#[bitmask(u8)]
pub enum RebalanceFlags {
    Balanced = 0,
    RotatedLeft = 1,
    RotatedRight = 2,
    Double = 4,
}

impl RebalanceFlags {
    pub fn rotated(&self) -> bool {
        self.intersects(RebalanceFlags::RotatedLeft | RebalanceFlags::RotatedRight)
    }
}

/// Promotes the right child of `node` to the root of the subtree.
pub fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.right.take() else {
        debug_assert!(false, "rotate_left on a node without right child");
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Promotes the left child of `node` to the root of the subtree.
pub fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.left.take() else {
        debug_assert!(false, "rotate_right on a node without left child");
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

pub fn rotate_left_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

pub fn rotate_right_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}

/// Refreshes the cached height of `node` and applies at most one single or
/// double rotation so that its balance factor is back in `[-1, 1]`.
///
/// Children must already be balanced.
pub fn rebalance<T>(mut node: Box<Node<T>>) -> (Box<Node<T>>, RebalanceFlags) {
    let double =
        RebalanceFlags::RotatedLeft | RebalanceFlags::RotatedRight | RebalanceFlags::Double;
    node.update_height();
    match node.balance() {
        2 => {
            if balance(&node.left) >= 0 {
                log::debug!("rebalance: rotate right at height {}", node.height);
                (rotate_right(node), RebalanceFlags::RotatedRight)
            } else {
                log::debug!("rebalance: rotate left-right at height {}", node.height);
                (rotate_left_right(node), double)
            }
        }
        -2 => {
            if balance(&node.right) <= 0 {
                log::debug!("rebalance: rotate left at height {}", node.height);
                (rotate_left(node), RebalanceFlags::RotatedLeft)
            } else {
                log::debug!("rebalance: rotate right-left at height {}", node.height);
                (rotate_right_left(node), double)
            }
        }
        _ => (node, RebalanceFlags::Balanced),
    }
}

/// Rebalances the subtree held in `link` in place and re-links the new root.
pub fn rebalance_link<T>(link: &mut Link<T>) -> RebalanceFlags {
    match link.take() {
        None => RebalanceFlags::Balanced,
        Some(node) => {
            let (node, flags) = rebalance(node);
            *link = Some(node);
            flags
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::node::height;
    use super::*;

    fn leaf(e: i32) -> Box<Node<i32>> {
        Node::try_new_leaf(e).unwrap()
    }

    fn with(mut n: Box<Node<i32>>, left: Link<i32>, right: Link<i32>) -> Box<Node<i32>> {
        n.left = left;
        n.right = right;
        n.update_height();
        n
    }

    fn in_order(link: &Link<i32>, out: &mut Vec<i32>) {
        if let Some(n) = link {
            in_order(&n.left, out);
            out.push(n.element);
            in_order(&n.right, out);
        }
    }

    #[test]
    fn single_rotations_mirror_each_other() {
        // 1 -> 2 -> 3 right chain
        let chain = with(leaf(1), None, Some(with(leaf(2), None, Some(leaf(3)))));
        let root = rotate_left(chain);
        assert_eq!(root.element, 2);
        assert_eq!(root.height, 2);
        assert_eq!(height(&root.left), 1);
        assert_eq!(height(&root.right), 1);

        let root = rotate_right(root);
        assert_eq!(root.element, 1);
        assert_eq!(root.height, 3);
        let mut seq = Vec::new();
        in_order(&Some(root), &mut seq);
        assert_eq!(seq, vec![1, 2, 3]);
    }

    #[test]
    fn left_right_case_rotates_twice() {
        // 3 with left child 1 whose right child is 2
        let node = with(leaf(3), Some(with(leaf(1), None, Some(leaf(2)))), None);
        assert_eq!(node.balance(), 2);
        let (root, flags) = rebalance(node);
        assert!(flags.contains(RebalanceFlags::Double));
        assert!(flags.rotated());
        assert_eq!(root.element, 2);
        assert_eq!(root.balance(), 0);
        assert_eq!(root.left.as_ref().map(|n| n.element), Some(1));
        assert_eq!(root.right.as_ref().map(|n| n.element), Some(3));
    }

    #[test]
    fn right_left_case_rotates_twice() {
        let node = with(leaf(1), None, Some(with(leaf(3), Some(leaf(2)), None)));
        let (root, flags) = rebalance(node);
        assert!(flags.contains(RebalanceFlags::Double));
        assert_eq!(root.element, 2);
        assert_eq!(root.height, 2);
    }

    #[test]
    fn balanced_node_only_refreshes_height() {
        let mut node = with(leaf(2), Some(leaf(1)), None);
        node.height = 9;
        let (node, flags) = rebalance(node);
        assert!(!flags.rotated());
        assert_eq!(node.height, 2);
        assert_eq!(node.element, 2);
    }

    #[test]
    fn rebalance_link_relinks_new_root() {
        let mut link = Some(with(leaf(3), Some(with(leaf(2), Some(leaf(1)), None)), None));
        let flags = rebalance_link(&mut link);
        assert!(flags.contains(RebalanceFlags::RotatedRight));
        assert!(!flags.contains(RebalanceFlags::Double));
        assert_eq!(link.as_ref().map(|n| n.element), Some(2));

        let mut empty: Link<i32> = None;
        assert!(!rebalance_link(&mut empty).rotated());
    }
}
