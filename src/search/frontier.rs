use std::{cmp::Reverse, collections::BinaryHeap};

use delegate::delegate;

use crate::{units::Cost, NodeId};

/// A node waiting to be expanded, with the tentative cost it was pushed at.
///
/// Ordered so that the max-heap pops the cheapest candidate first, and among equal costs the
/// smallest node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Candidate {
    cost: Reverse<Cost>,
    node: Reverse<NodeId>,
}

impl Candidate {
    pub(crate) fn new(cost: Cost, node: NodeId) -> Self {
        Self {
            cost: Reverse(cost),
            node: Reverse(node),
        }
    }

    pub(crate) fn cost(&self) -> Cost {
        self.cost.0
    }

    pub(crate) fn node(&self) -> NodeId {
        self.node.0
    }
}

#[derive(Debug, Default)]
pub(crate) struct Frontier {
    inner: BinaryHeap<Candidate>,
}

impl Frontier {
    delegate! {
        to self.inner {
            pub(crate) fn push(&mut self, candidate: Candidate);
            pub(crate) fn pop(&mut self) -> Option<Candidate>;
        }
    }
}
