use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::{
    exclusivity::Exclusivity,
    graph::Graph,
    instance::{Demand, Instance},
    report::{Hop, InstanceReport, Outcome},
    search::{find_route, Route},
    units::Rate,
};

/// Routes the demands of one instance greedily, in input order.
///
/// Every committed route consumes its bottleneck rate on each edge it crosses and locks its nodes
/// out of the transmitter and receiver roles it used. Earlier demands therefore shape what later
/// demands can get.
#[derive(Debug)]
pub struct Allocator<'a> {
    instance: &'a Instance,
    graph: Graph,
    exclusivity: Exclusivity,
    used_links: BTreeSet<Hop>,
    outcomes: Vec<Outcome>,
}

impl<'a> Allocator<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            graph: Graph::new(instance.nr_nodes, &instance.links),
            exclusivity: Exclusivity::new(),
            used_links: BTreeSet::new(),
            outcomes: Vec::with_capacity(instance.nr_demands()),
        }
    }

    pub fn run(mut self) -> InstanceReport {
        for &demand in &self.instance.demands {
            self.step(demand);
        }
        self.finish()
    }

    /// Routes a single demand against the current state and records its outcome.
    pub fn step(&mut self, demand: Demand) -> &Outcome {
        if demand.source == demand.destination {
            warn!(demand = %demand.id, node = %demand.source, "demand loops back to its source");
        }
        let outcome = match find_route(
            &self.graph,
            &self.exclusivity,
            demand.source,
            demand.destination,
        ) {
            Some(route) => self.commit(demand, route),
            None => {
                debug!(
                    demand = %demand.id,
                    source = %demand.source,
                    destination = %demand.destination,
                    "no admissible route"
                );
                Outcome::new_unroutable(demand.id)
            }
        };
        self.outcomes.push(outcome);
        &self.outcomes[self.outcomes.len() - 1]
    }

    fn commit(&mut self, demand: Demand, route: Route) -> Outcome {
        let rate = route.bottleneck;
        let mut path = Vec::with_capacity(route.edges.len() + 1);
        path.push(demand.source);
        for &id in &route.edges {
            self.graph.commit(id, rate);
            let edge = self.graph.edge(id);
            self.exclusivity.claim(edge);
            self.used_links.insert(Hop::new(edge.from, edge.to));
            path.push(edge.to);
        }
        debug!(
            demand = %demand.id,
            %rate,
            hops = route.edges.len(),
            "committed route"
        );
        Outcome::new_routed(demand.id, rate, path)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn exclusivity(&self) -> &Exclusivity {
        &self.exclusivity
    }

    pub fn finish(self) -> InstanceReport {
        let total: Rate = self.outcomes.iter().map(Outcome::rate).sum();
        InstanceReport {
            used_links: self.used_links.into_iter().collect(),
            outcomes: self.outcomes,
            total,
        }
    }
}

/// Allocates one instance from a fresh state.
pub fn allocate(instance: &Instance) -> InstanceReport {
    Allocator::new(instance).run()
}
