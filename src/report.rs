use std::fmt;

use crate::{units::Rate, DemandId, NodeId};

/// A directed link that carries at least one committed path.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_new::new,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Hop {
    pub from: NodeId,
    pub to: NodeId,
}

/// What happened to one demand.
#[derive(Debug, Clone, PartialEq, derive_new::new, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Routed {
        demand: DemandId,
        /// The committed rate, equal to the route's bottleneck.
        rate: Rate,
        /// Nodes from source to destination, both included.
        path: Vec<NodeId>,
    },
    Unroutable {
        demand: DemandId,
    },
}

impl Outcome {
    pub fn demand(&self) -> DemandId {
        match self {
            Outcome::Routed { demand, .. } | Outcome::Unroutable { demand } => *demand,
        }
    }

    pub fn rate(&self) -> Rate {
        match self {
            Outcome::Routed { rate, .. } => *rate,
            Outcome::Unroutable { .. } => Rate::ZERO,
        }
    }

    pub fn path(&self) -> &[NodeId] {
        match self {
            Outcome::Routed { path, .. } => path,
            Outcome::Unroutable { .. } => &[],
        }
    }

    pub fn is_routed(&self) -> bool {
        matches!(self, Outcome::Routed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Routed { rate, path, .. } => {
                write!(f, "{:.6} {}", rate.into_f64(), path.len())?;
                for node in path {
                    write!(f, " {node}")?;
                }
                Ok(())
            }
            Outcome::Unroutable { .. } => write!(f, "0 0"),
        }
    }
}

/// The result of allocating one instance.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InstanceReport {
    /// Distinct links used by committed paths, sorted.
    pub used_links: Vec<Hop>,
    /// One outcome per demand, in input order.
    pub outcomes: Vec<Outcome>,
    /// Sum of committed rates.
    pub total: Rate,
}

impl InstanceReport {
    pub fn routed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_routed()).count()
    }
}

impl fmt::Display for InstanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.used_links.len())?;
        for hop in &self.used_links {
            writeln!(f, "{} {}", hop.from, hop.to)?;
        }
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
        }
        writeln!(f, "{:.6}", self.total.into_f64())
    }
}

/// The result of a whole batch.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BatchReport {
    /// An opaque token printed before everything else.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub instances: Vec<InstanceReport>,
    /// Mean instance total; zero for an empty batch.
    pub mean: Rate,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(header) = &self.header {
            writeln!(f, "{header}")?;
        }
        for instance in &self.instances {
            write!(f, "{instance}")?;
        }
        writeln!(f, "{:.6}", self.mean.into_f64())
    }
}

/// Arithmetic mean maintained one sample at a time.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RunningMean {
    sum: Rate,
    count: usize,
}

impl RunningMean {
    pub(crate) fn push(&mut self, sample: Rate) -> Rate {
        self.sum += sample;
        self.count += 1;
        self.value()
    }

    pub(crate) fn value(&self) -> Rate {
        self.sum.checked_div(self.count).unwrap_or(Rate::ZERO)
    }
}
