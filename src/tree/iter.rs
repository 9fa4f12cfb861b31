// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! In-order walks over a [`FrequencyTree`](super::FrequencyTree).

use super::{Direction, Link, Node};

/// Iterator over `(key, count)` pairs, ascending for
/// [`Direction::Forward`] and descending for [`Direction::Reverse`].
///
/// Uses an explicit stack bounded by the tree height.
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    direction: Direction,
}

impl<'a, K> Iter<'a, K> {
    pub(super) fn new(root: &'a Link<K>, direction: Direction) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            direction,
        };
        iter.descend(root.as_deref());
        iter
    }

    /// Push `node` and its chain of near-side children.
    fn descend(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = match self.direction {
                Direction::Forward => n.left.as_deref(),
                Direction::Reverse => n.right.as_deref(),
            };
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let far = match self.direction {
            Direction::Forward => node.right.as_deref(),
            Direction::Reverse => node.left.as_deref(),
        };
        self.descend(far);
        Some((&node.key, node.count))
    }
}
