// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Ordered counting tree used for histograms.
//!
//! [`FrequencyTree`] is an unbalanced binary search tree keyed by any `Ord`
//! type, each node carrying how many times its key was inserted. Sweeps
//! insert keys in roughly increasing order, so trees can degenerate into long
//! chains: every operation here (insert, search, traversal, clone and
//! teardown) is iterative and never recurses on the tree height.
//!
//! # Example
//!
//! ```
//! use collatz_orbits::tree::{Direction, FrequencyTree};
//!
//! let tree: FrequencyTree<&str> = ["b", "a", "b"].into_iter().collect();
//! assert_eq!(tree.search(&"b"), 2);
//!
//! let mut seen = Vec::new();
//! let mut record = |key: &&str, count: u64| seen.push(format!("{key}:{count}"));
//! let total = tree.traverse(Direction::Reverse, Some(&mut record));
//! assert_eq!(total, 3);
//! assert_eq!(seen, ["b:2", "a:1"]);
//! ```

mod iter;

pub use iter::Iter;

use std::cmp::Ordering;
use std::fmt;

/// Traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending keys.
    #[default]
    Forward,
    /// Descending keys.
    Reverse,
}

pub(crate) type Link<K> = Option<Box<Node<K>>>;

pub(crate) struct Node<K> {
    key: K,
    count: u64,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn leaf(key: K, count: u64) -> Box<Self> {
        Box::new(Self {
            key,
            count,
            left: None,
            right: None,
        })
    }
}

/// Unbalanced binary search tree counting occurrences of each key.
pub struct FrequencyTree<K> {
    root: Link<K>,
    nodes: usize,
}

impl<K> FrequencyTree<K> {
    /// An empty tree.
    pub fn new() -> Self {
        Self {
            root: None,
            nodes: 0,
        }
    }

    /// Number of distinct keys.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// True when no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Ascending `(key, count)` pairs.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.root, Direction::Forward)
    }

    /// Descending `(key, count)` pairs.
    pub fn iter_rev(&self) -> Iter<'_, K> {
        Iter::new(&self.root, Direction::Reverse)
    }

    /// Visit every key in `direction`, returning the sum of all counts.
    ///
    /// The sum is returned whether or not a visitor is supplied.
    pub fn traverse(
        &self,
        direction: Direction,
        mut visitor: Option<&mut dyn FnMut(&K, u64)>,
    ) -> u64 {
        let mut total = 0;
        for (key, count) in Iter::new(&self.root, direction) {
            if let Some(visit) = visitor.as_deref_mut() {
                visit(key, count);
            }
            total += count;
        }
        total
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.traverse(Direction::Forward, None)
    }

    /// Free every node, children before parents, and leave the tree empty
    /// and reusable. Returns the number of nodes freed.
    pub fn destroy(&mut self) -> usize {
        let mut freed = 0;
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            let (left, right) = (node.left.take(), node.right.take());
            if left.is_none() && right.is_none() {
                drop(node);
                freed += 1;
                continue;
            }
            // Revisit once both subtrees are gone.
            stack.push(node);
            stack.extend(right);
            stack.extend(left);
        }
        self.nodes = 0;
        freed
    }
}

impl<K: Ord> FrequencyTree<K> {
    /// Count one more occurrence of `key`.
    pub fn insert(&mut self, key: K) {
        self.insert_count(key, 1);
    }

    /// Add `count` occurrences of `key`. A zero count leaves the tree alone.
    pub fn insert_count(&mut self, key: K, count: u64) {
        if count == 0 {
            return;
        }
        let mut link = &mut self.root;
        loop {
            let slot = link;
            match slot {
                Some(node) => match key.cmp(&node.key) {
                    Ordering::Less => link = &mut node.left,
                    Ordering::Greater => link = &mut node.right,
                    Ordering::Equal => {
                        node.count += count;
                        return;
                    }
                },
                None => {
                    *slot = Some(Node::leaf(key, count));
                    self.nodes += 1;
                    return;
                }
            }
        }
    }

    /// Count recorded for `key`, 0 when absent.
    pub fn search(&self, key: &K) -> u64 {
        let mut link = &self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
                Ordering::Equal => return node.count,
            };
        }
        0
    }

    /// Move every entry of `other` into this tree, summing counts of shared
    /// keys.
    ///
    /// Entries are taken in pre-order, so merging into an empty tree keeps
    /// the shape of `other`.
    pub fn merge(&mut self, mut other: Self) {
        let mut stack: Vec<Box<Node<K>>> = other.root.take().into_iter().collect();
        other.nodes = 0;
        while let Some(mut node) = stack.pop() {
            stack.extend(node.right.take());
            stack.extend(node.left.take());
            let Node { key, count, .. } = *node;
            self.insert_count(key, count);
        }
    }
}

impl<K> Drop for FrequencyTree<K> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<K> Default for FrequencyTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

enum CloneTask<'a, K> {
    Visit(&'a Node<K>),
    Build(&'a Node<K>),
}

impl<K: Clone> Clone for FrequencyTree<K> {
    /// Deep copy with the same shape, built bottom up without recursion.
    fn clone(&self) -> Self {
        let mut tasks: Vec<CloneTask<'_, K>> = Vec::new();
        let mut built: Vec<Box<Node<K>>> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            tasks.push(CloneTask::Visit(root));
        }

        while let Some(task) = tasks.pop() {
            match task {
                CloneTask::Visit(node) => {
                    tasks.push(CloneTask::Build(node));
                    if let Some(right) = node.right.as_deref() {
                        tasks.push(CloneTask::Visit(right));
                    }
                    if let Some(left) = node.left.as_deref() {
                        tasks.push(CloneTask::Visit(left));
                    }
                }
                CloneTask::Build(node) => {
                    // Right was finished last, so it sits on top.
                    let right = node.right.as_ref().and_then(|_| built.pop());
                    let left = node.left.as_ref().and_then(|_| built.pop());
                    built.push(Box::new(Node {
                        key: node.key.clone(),
                        count: node.count,
                        left,
                        right,
                    }));
                }
            }
        }

        Self {
            root: built.pop(),
            nodes: self.nodes,
        }
    }
}

impl<K: Ord> Extend<K> for FrequencyTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for FrequencyTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.extend(keys);
        tree
    }
}

impl<'a, K> IntoIterator for &'a FrequencyTree<K> {
    type Item = (&'a K, u64);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug> fmt::Debug for FrequencyTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
