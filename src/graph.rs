use crate::{
    instance::{Link, MAX_NODES},
    units::Rate,
    EdgeId, NodeId,
};

/// Slack allowed when a commit overshoots the residual capacity by floating-point rounding,
/// relative to the edge capacity (or 1, whichever is larger).
const COMMIT_TOLERANCE: f64 = 1e-9;

/// One direction of an undirected link.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Rate,
    pub used: Rate,
}

impl Edge {
    pub fn residual(&self) -> Rate {
        self.capacity - self.used
    }

    pub fn is_saturated(&self) -> bool {
        self.used >= self.capacity
    }
}

/// The mutable network state for one allocation run.
///
/// Every link `(u, v, c)` expands into two directed edges, `u -> v` and `v -> u`, each with
/// capacity `c` and its own `used` counter. Committing on one direction leaves the other alone.
#[derive(Debug, Clone)]
pub struct Graph {
    edges: Vec<Edge>,
    adjacency: Vec<Vec<EdgeId>>,
}

impl Graph {
    /// Builds a fresh graph with all `used` counters at zero.
    ///
    /// # Panics
    ///
    /// Panics if `nr_nodes` exceeds [`MAX_NODES`] or a link endpoint is not below `nr_nodes`.
    pub fn new(nr_nodes: usize, links: &[Link]) -> Self {
        assert!(nr_nodes <= MAX_NODES, "{nr_nodes} nodes exceeds the limit of {MAX_NODES}");
        let mut edges = Vec::with_capacity(2 * links.len());
        let mut adjacency = vec![Vec::new(); nr_nodes];
        for link in links {
            assert!(
                link.u.into_usize() < nr_nodes && link.v.into_usize() < nr_nodes,
                "link {} -> {} out of range for {nr_nodes} nodes",
                link.u,
                link.v
            );
            for (from, to) in [(link.u, link.v), (link.v, link.u)] {
                let id = EdgeId::new(edges.len());
                edges.push(Edge {
                    from,
                    to,
                    capacity: link.capacity,
                    used: Rate::ZERO,
                });
                adjacency[from.into_usize()].push(id);
            }
        }
        Self { edges, adjacency }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.into_usize()]
    }

    /// Outgoing edges of `node`, in link input order.
    pub fn adjacency(&self, node: NodeId) -> &[EdgeId] {
        &self.adjacency[node.into_usize()]
    }

    // PRECONDITION: `amount` must not exceed the edge's residual capacity
    pub fn commit(&mut self, id: EdgeId, amount: Rate) {
        let edge = &mut self.edges[id.into_usize()];
        let slack = Rate::new(COMMIT_TOLERANCE * edge.capacity.into_f64().max(1.0));
        assert!(amount >= Rate::ZERO, "negative commit {amount} on edge {id}");
        assert!(
            amount <= edge.residual() + slack,
            "commit of {amount} on edge {id} exceeds residual {}",
            edge.residual()
        );
        // Rounding may push `used` a hair past `capacity`; the assertion above bounds how far
        edge.used = (edge.used + amount).min(edge.capacity);
    }
}
