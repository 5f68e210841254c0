use rustc_hash::FxHashSet;

use crate::{graph::Edge, NodeId};

/// Tracks which nodes have already been committed as a transmitter or a receiver.
///
/// Each node has a single half-duplex radio: once it transmits on a committed path it may not
/// transmit again in the same run, and likewise for receiving. Nothing is ever released.
#[derive(Debug, Default, Clone)]
pub struct Exclusivity {
    transmitting: FxHashSet<NodeId>,
    receiving: FxHashSet<NodeId>,
}

impl Exclusivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_transmitting(&self, node: NodeId) -> bool {
        self.transmitting.contains(&node)
    }

    pub fn is_receiving(&self, node: NodeId) -> bool {
        self.receiving.contains(&node)
    }

    /// Whether `edge` may carry a new path: its tail is free to transmit and its head is free to
    /// receive.
    pub fn admits(&self, edge: &Edge) -> bool {
        !self.is_transmitting(edge.from) && !self.is_receiving(edge.to)
    }

    pub(crate) fn claim(&mut self, edge: &Edge) {
        self.transmitting.insert(edge.from);
        self.receiving.insert(edge.to);
    }
}
