use std::{fmt, str::FromStr};

use crate::{units::Rate, DemandId, NodeId};

/// Largest node count an instance may declare.
pub const MAX_NODES: usize = 1 << 24;

// Counts come from untrusted input, so reservations are capped and vectors grow as records arrive
const MAX_RESERVE: usize = 1024;

/// An undirected link between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, derive_new::new, serde::Serialize, serde::Deserialize)]
pub struct Link {
    pub u: NodeId,
    pub v: NodeId,
    pub capacity: Rate,
}

/// A request to carry traffic from `source` to `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new, serde::Serialize, serde::Deserialize)]
pub struct Demand {
    pub id: DemandId,
    pub source: NodeId,
    pub destination: NodeId,
}

/// One independent test case: a graph and an ordered list of demands.
#[derive(
    Debug, Clone, PartialEq, typed_builder::TypedBuilder, serde::Serialize, serde::Deserialize,
)]
pub struct Instance {
    pub nr_nodes: usize,
    #[builder(default)]
    pub links: Vec<Link>,
    #[builder(default)]
    pub demands: Vec<Demand>,
}

impl Instance {
    pub fn nr_links(&self) -> usize {
        self.links.len()
    }

    pub fn nr_demands(&self) -> usize {
        self.demands.len()
    }
}

/// Parses a whole batch: the instance count followed by that many instances.
///
/// Tokens after the last instance are ignored.
pub fn parse_batch(input: &str) -> Result<Vec<Instance>, ParseError> {
    let mut tokens = Tokens::new(input);
    let nr_instances: usize = tokens.next(Field::InstanceCount, Location::Header)?;
    (0..nr_instances)
        .map(|index| parse_instance(&mut tokens, index))
        .collect()
}

fn parse_instance(tokens: &mut Tokens<'_>, instance: usize) -> Result<Instance, ParseError> {
    let loc = Location::Instance { instance };
    let nr_nodes: usize = tokens.next(Field::NodeCount, loc)?;
    if nr_nodes > MAX_NODES {
        return Err(ParseError::TooManyNodes { nr_nodes, loc });
    }
    let nr_links: usize = tokens.next(Field::LinkCount, loc)?;
    let nr_demands: usize = tokens.next(Field::DemandCount, loc)?;

    let mut links = Vec::with_capacity(nr_links.min(MAX_RESERVE));
    for index in 0..nr_links {
        let loc = Location::Link { instance, index };
        let u = tokens.next_node(Field::LinkEndpoint, loc, nr_nodes)?;
        let v = tokens.next_node(Field::LinkEndpoint, loc, nr_nodes)?;
        let capacity: Rate = tokens.next(Field::Capacity, loc)?;
        if !capacity.is_finite() || capacity < Rate::ZERO {
            return Err(ParseError::Capacity { capacity, loc });
        }
        links.push(Link::new(u, v, capacity));
    }

    let mut demands = Vec::with_capacity(nr_demands.min(MAX_RESERVE));
    for index in 0..nr_demands {
        let loc = Location::Demand { instance, index };
        let source = tokens.next_node(Field::Source, loc, nr_nodes)?;
        let destination = tokens.next_node(Field::Destination, loc, nr_nodes)?;
        demands.push(Demand::new(DemandId::new(index), source, destination));
    }

    Ok(Instance {
        nr_nodes,
        links,
        demands,
    })
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
        }
    }

    fn next<T: FromStr>(&mut self, field: Field, loc: Location) -> Result<T, ParseError> {
        let token = self
            .inner
            .next()
            .ok_or(ParseError::Missing { field, loc })?;
        token.parse().map_err(|_| ParseError::Invalid {
            field,
            token: token.to_owned(),
            loc,
        })
    }

    fn next_node(
        &mut self,
        field: Field,
        loc: Location,
        nr_nodes: usize,
    ) -> Result<NodeId, ParseError> {
        let node: NodeId = self.next(field, loc)?;
        if node.into_usize() >= nr_nodes {
            return Err(ParseError::NodeOutOfRange {
                field,
                node,
                nr_nodes,
                loc,
            });
        }
        Ok(node)
    }
}

/// An input field, named in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Field {
    #[display(fmt = "instance count")]
    InstanceCount,
    #[display(fmt = "node count")]
    NodeCount,
    #[display(fmt = "link count")]
    LinkCount,
    #[display(fmt = "demand count")]
    DemandCount,
    #[display(fmt = "link endpoint")]
    LinkEndpoint,
    #[display(fmt = "link capacity")]
    Capacity,
    #[display(fmt = "demand source")]
    Source,
    #[display(fmt = "demand destination")]
    Destination,
}

/// Where in the input a field was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Header,
    Instance { instance: usize },
    Link { instance: usize, index: usize },
    Demand { instance: usize, index: usize },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Header => write!(f, "batch header"),
            Location::Instance { instance } => write!(f, "instance {instance}"),
            Location::Link { instance, index } => write!(f, "instance {instance}, link {index}"),
            Location::Demand { instance, index } => {
                write!(f, "instance {instance}, demand {index}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("missing {field} ({loc})")]
    Missing { field: Field, loc: Location },

    #[error("invalid {field} {token:?} ({loc})")]
    Invalid {
        field: Field,
        token: String,
        loc: Location,
    },

    #[error("{field} {node} out of range for {nr_nodes} nodes ({loc})")]
    NodeOutOfRange {
        field: Field,
        node: NodeId,
        nr_nodes: usize,
        loc: Location,
    },

    #[error("node count {nr_nodes} exceeds the limit of {MAX_NODES} ({loc})")]
    TooManyNodes { nr_nodes: usize, loc: Location },

    #[error("link capacity {capacity} must be finite and non-negative ({loc})")]
    Capacity { capacity: Rate, loc: Location },
}
