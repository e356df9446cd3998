use crate::models::{Nested, Node};
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Flatten `input` into its leaves in depth-first, left-to-right order.
///
/// The walk keeps its own work list instead of recursing, so nesting depth
/// costs heap for pending siblings only and never call stack.
pub fn flatten<N: Nested>(input: N) -> Vec<N::Leaf> {
    flat_iter(input).collect()
}

pub fn flat_iter<N: Nested>(input: N) -> FlatIter<N> {
    FlatIter::new(input)
}

/// Lazy form of [`flatten`]: yields one leaf per call to `next`.
pub struct FlatIter<N> {
    pending: VecDeque<N>,
}

impl<N: Nested> FlatIter<N> {
    pub fn new(input: N) -> Self {
        let mut pending = VecDeque::new();
        pending.push_back(input);
        Self { pending }
    }

    /// Values waiting to be expanded or emitted.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl<N: Nested> Iterator for FlatIter<N> {
    type Item = N::Leaf;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(front) = self.pending.pop_front() {
            match front.into_node() {
                Node::Leaf(leaf) => return Some(leaf),
                Node::Container(children) => {
                    // Children replace their container at the front, first child first.
                    let children: Vec<N> = children.into_iter().collect();
                    for child in children.into_iter().rev() {
                        self.pending.push_front(child);
                    }
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, if self.pending.is_empty() { Some(0) } else { None })
    }
}

impl<N: Nested> FusedIterator for FlatIter<N> {}
