use rand::Rng;
use rand::seq::SliceRandom;

/// Number of values held by a tree built with [`Tree::shuffled`].
pub const SHUFFLED_SIZE: i64 = 10;

/// An immutable binary tree node. Children are exclusively owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub value: i64,
    pub left: Option<Box<Tree>>,
    pub right: Option<Box<Tree>>,
}

impl Tree {
    pub fn new(value: i64, left: Option<Tree>, right: Option<Tree>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn leaf(value: i64) -> Self {
        Self::new(value, None, None)
    }

    /// Binary-search insert. Equal values go to the right subtree.
    pub fn insert(&mut self, value: i64) {
        let slot = if value < self.value {
            &mut self.left
        } else {
            &mut self.right
        };

        match slot {
            Some(child) => child.insert(value),
            None => *slot = Some(Box::new(Tree::leaf(value))),
        }
    }

    /// Builds a search tree by inserting `values` in iteration order.
    /// Returns `None` for an empty input.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut values = values.into_iter();
        let mut tree = Tree::leaf(values.next()?);
        for value in values {
            tree.insert(value);
        }
        Some(tree)
    }

    /// A randomly shaped search tree holding `k, 2k, ..., 10k`.
    ///
    /// Two trees built from the same `k` always walk to the same sequence,
    /// whatever shape they end up with.
    pub fn shuffled(k: i64) -> Self {
        Self::shuffled_with(k, &mut rand::thread_rng())
    }

    pub fn shuffled_with<R: Rng + ?Sized>(k: i64, rng: &mut R) -> Self {
        let mut values: Vec<i64> = (1..=SHUFFLED_SIZE).map(|i| i * k).collect();
        values.shuffle(rng);

        let mut tree = Tree::leaf(values[0]);
        for value in &values[1..] {
            tree.insert(*value);
        }
        tree
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |t| t.len()) + self.right.as_ref().map_or(0, |t| t.len())
    }

    /// A node always holds a value, so a tree is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn depth(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |t| t.depth());
        let right = self.right.as_ref().map_or(0, |t| t.depth());
        1 + left.max(right)
    }

    /// In-order iterator over the node values.
    pub fn iter(&self) -> InOrder<'_> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(Some(self));
        iter
    }

    pub fn values(&self) -> Vec<i64> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = i64;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Left subtree, then the node, then the right subtree.
#[derive(Debug)]
pub struct InOrder<'a> {
    stack: Vec<&'a Tree>,
}

impl<'a> InOrder<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a Tree>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl Iterator for InOrder<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node.value)
    }
}
