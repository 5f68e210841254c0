//! Capacity- and exclusivity-constrained shortest-path search.

mod frontier;

use smallvec::SmallVec;

use crate::{
    exclusivity::Exclusivity,
    graph::{Edge, Graph},
    units::{Cost, Rate},
    EdgeId, NodeId,
};

use self::frontier::{Candidate, Frontier};

/// Scales how strongly partially used edges are avoided.
const CONGESTION_PENALTY: f64 = 1e4;

// Most routes in the target topologies are only a handful of hops long
pub type EdgePath = SmallVec<[EdgeId; 8]>;

/// A feasible route found by [`find_route`].
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Edges from source to destination.
    pub edges: EdgePath,
    /// The smallest residual capacity along `edges`, evaluated before anything is committed.
    pub bottleneck: Rate,
}

/// The search weight of an edge.
///
/// Every hop costs at least one, and an edge gets steadily more expensive as its load grows. Load
/// alone never makes an edge infeasible; only saturation does.
pub fn weight(edge: &Edge) -> Cost {
    let load = edge.used.into_f64() * CONGESTION_PENALTY / edge.capacity.into_f64().max(1.0);
    Cost::new(1.0 + load)
}

/// Finds the cheapest admissible route from `source` to `destination`.
///
/// An edge is admissible when it is not saturated, its tail has not transmitted yet, and its head
/// has not received yet. Returns `None` when the destination cannot be reached, which includes
/// `source == destination`.
///
/// # Panics
///
/// Panics if either endpoint is not a node of `graph`.
pub fn find_route(
    graph: &Graph,
    exclusivity: &Exclusivity,
    source: NodeId,
    destination: NodeId,
) -> Option<Route> {
    let n = graph.node_count();
    assert!(source.into_usize() < n, "source {source} out of range");
    assert!(destination.into_usize() < n, "destination {destination} out of range");

    let mut dist = vec![Cost::MAX; n];
    let mut prev: Vec<Option<EdgeId>> = vec![None; n];
    let mut frontier = Frontier::default();

    dist[source.into_usize()] = Cost::ZERO;
    frontier.push(Candidate::new(Cost::ZERO, source));

    while let Some(candidate) = frontier.pop() {
        let (cost, node) = (candidate.cost(), candidate.node());
        if node == destination {
            break;
        }
        if cost > dist[node.into_usize()] {
            // Stale entry; this node was already expanded at a lower cost
            continue;
        }
        for &id in graph.adjacency(node) {
            let edge = graph.edge(id);
            if edge.is_saturated() || !exclusivity.admits(edge) {
                continue;
            }
            let next = cost + weight(edge);
            let to = edge.to.into_usize();
            if next < dist[to] {
                dist[to] = next;
                prev[to] = Some(id);
                frontier.push(Candidate::new(next, edge.to));
            }
        }
    }

    // Costs strictly increase along predecessor links, so the source never gets one. That also
    // covers `source == destination`.
    if prev[destination.into_usize()].is_none() {
        return None;
    }

    let mut edges = EdgePath::new();
    let mut bottleneck = Rate::INFINITY;
    let mut cur = destination;
    while cur != source {
        let id = prev[cur.into_usize()].expect("broken predecessor chain");
        let edge = graph.edge(id);
        edges.push(id);
        bottleneck = bottleneck.min(edge.residual());
        cur = edge.from;
    }
    edges.reverse();
    Some(Route { edges, bottleneck })
}

#[cfg(test)]
mod tests {
    use crate::instance::Link;

    use super::*;

    fn graph(nr_nodes: usize, links: &[(usize, usize, f64)]) -> Graph {
        let links = links
            .iter()
            .map(|&(u, v, c)| Link::new(NodeId::new(u), NodeId::new(v), Rate::new(c)))
            .collect::<Vec<_>>();
        Graph::new(nr_nodes, &links)
    }

    fn nodes(graph: &Graph, route: &Route) -> Vec<usize> {
        let mut nodes = vec![graph.edge(route.edges[0]).from.into_usize()];
        nodes.extend(route.edges.iter().map(|&e| graph.edge(e).to.into_usize()));
        nodes
    }

    fn route(graph: &Graph, s: usize, d: usize) -> Option<Route> {
        find_route(graph, &Exclusivity::new(), NodeId::new(s), NodeId::new(d))
    }

    #[test]
    fn weight_grows_with_load() {
        let mut g = graph(2, &[(0, 1, 100.0)]);
        assert_eq!(weight(g.edge(EdgeId::ZERO)), Cost::new(1.0));
        g.commit(EdgeId::ZERO, Rate::new(50.0));
        assert_eq!(weight(g.edge(EdgeId::ZERO)), Cost::new(5001.0));
    }

    #[test]
    fn weight_floors_small_capacity() {
        let mut g = graph(2, &[(0, 1, 0.5)]);
        g.commit(EdgeId::ZERO, Rate::new(0.25));
        assert_eq!(weight(g.edge(EdgeId::ZERO)), Cost::new(2501.0));
    }

    #[test]
    fn line_route() {
        let g = graph(3, &[(0, 1, 10.0), (1, 2, 10.0)]);
        let r = route(&g, 0, 2).unwrap();
        assert_eq!(nodes(&g, &r), vec![0, 1, 2]);
        assert_eq!(r.edges.as_slice(), &[EdgeId::new(0), EdgeId::new(2)]);
        assert_eq!(r.bottleneck, Rate::new(10.0));
    }

    #[test]
    fn reverse_direction_route() {
        let g = graph(3, &[(0, 1, 10.0), (1, 2, 3.0)]);
        let r = route(&g, 2, 0).unwrap();
        assert_eq!(nodes(&g, &r), vec![2, 1, 0]);
        assert_eq!(r.bottleneck, Rate::new(3.0));
    }

    #[test]
    fn prefers_fewer_hops() {
        let g = graph(4, &[(0, 1, 1.0), (1, 3, 1.0), (0, 2, 1.0), (2, 1, 1.0), (0, 3, 0.5)]);
        let r = route(&g, 0, 3).unwrap();
        assert_eq!(nodes(&g, &r), vec![0, 3]);
        assert_eq!(r.bottleneck, Rate::new(0.5));
    }

    #[test]
    fn avoids_loaded_edge() {
        let mut g = graph(4, &[(0, 1, 10.0), (1, 3, 10.0), (0, 2, 10.0), (2, 3, 10.0)]);
        // Lightly load 0 -> 1; the equal-length path via 2 becomes cheaper
        g.commit(EdgeId::new(0), Rate::new(1.0));
        let r = route(&g, 0, 3).unwrap();
        assert_eq!(nodes(&g, &r), vec![0, 2, 3]);
    }

    #[test]
    fn loaded_edge_still_usable() {
        let mut g = graph(3, &[(0, 1, 10.0), (1, 2, 10.0)]);
        g.commit(EdgeId::new(0), Rate::new(9.0));
        let r = route(&g, 0, 2).unwrap();
        assert_eq!(nodes(&g, &r), vec![0, 1, 2]);
        assert_eq!(r.bottleneck, Rate::new(1.0));
    }

    #[test]
    fn ties_break_toward_lower_node_id() {
        let g = graph(4, &[(0, 2, 1.0), (2, 3, 1.0), (0, 1, 1.0), (1, 3, 1.0)]);
        let r = route(&g, 0, 3).unwrap();
        assert_eq!(nodes(&g, &r), vec![0, 1, 3]);
    }

    #[test]
    fn saturated_edge_blocks() {
        let mut g = graph(3, &[(0, 1, 10.0), (1, 2, 10.0)]);
        g.commit(EdgeId::new(2), Rate::new(10.0));
        assert!(route(&g, 0, 2).is_none());
        // The opposite direction is unaffected
        assert!(route(&g, 2, 0).is_some());
    }

    #[test]
    fn exclusivity_blocks_intermediate_node() {
        let g = graph(4, &[(0, 1, 10.0), (1, 2, 10.0), (3, 1, 10.0)]);
        let mut excl = Exclusivity::new();
        // Node 1 already received (from 3)
        excl.claim(g.edge(EdgeId::new(4)));
        assert!(find_route(&g, &excl, NodeId::new(0), NodeId::new(2)).is_none());
        // But it may still transmit
        let r = find_route(&g, &excl, NodeId::new(1), NodeId::new(2)).unwrap();
        assert_eq!(nodes(&g, &r), vec![1, 2]);
    }

    #[test]
    fn exclusivity_applies_to_endpoints() {
        let g = graph(3, &[(0, 1, 10.0), (0, 2, 10.0)]);
        let mut excl = Exclusivity::new();
        excl.claim(g.edge(EdgeId::new(0)));
        assert!(find_route(&g, &excl, NodeId::new(0), NodeId::new(2)).is_none());
    }

    #[test]
    fn unreachable() {
        let g = graph(3, &[(0, 1, 10.0)]);
        assert!(route(&g, 0, 2).is_none());
    }

    #[test]
    fn same_endpoints_have_no_route() {
        let g = graph(2, &[(0, 1, 10.0)]);
        assert!(route(&g, 1, 1).is_none());
    }
}
