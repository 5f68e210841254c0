use std::{
    io::{Read, Write},
    path::Path,
    str::FromStr,
};

use tracing::info;

use crate::{
    allocator::allocate,
    instance::{parse_batch, Instance, ParseError},
    report::{BatchReport, RunningMean},
};

/// How a batch report is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derivative::Derivative)]
#[derivative(Default)]
pub enum Format {
    /// The line-oriented text format.
    #[derivative(Default)]
    Text,
    /// A single JSON document.
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format {other:?}; expected \"text\" or \"json\"")),
        }
    }
}

#[derive(Debug, Clone, Default, typed_builder::TypedBuilder)]
pub struct Config {
    /// Opaque token emitted as the first line of the report.
    #[builder(default, setter(into, strip_option))]
    header: Option<String>,
    #[builder(default)]
    format: Format,
}

/// Allocates every instance independently and aggregates the totals.
pub fn run(cfg: &Config, instances: &[Instance]) -> BatchReport {
    let mut mean = RunningMean::default();
    let reports = instances
        .iter()
        .enumerate()
        .map(|(index, instance)| {
            let report = allocate(instance);
            let running = mean.push(report.total);
            info!(
                instance = index,
                nodes = instance.nr_nodes,
                links = instance.nr_links(),
                demands = instance.nr_demands(),
                routed = report.routed_count(),
                total = %report.total,
                mean = %running,
                "allocated instance"
            );
            report
        })
        .collect();
    BatchReport {
        header: cfg.header.clone(),
        instances: reports,
        mean: mean.value(),
    }
}

pub fn read_batch(path: impl AsRef<Path>) -> Result<Vec<Instance>, Error> {
    let s = std::fs::read_to_string(path)?;
    Ok(parse_batch(&s)?)
}

pub fn read_batch_from(mut reader: impl Read) -> Result<Vec<Instance>, Error> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    Ok(parse_batch(&s)?)
}

pub fn write_report(
    cfg: &Config,
    report: &BatchReport,
    mut writer: impl Write,
) -> Result<(), Error> {
    match cfg.format {
        Format::Text => write!(writer, "{report}")?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, report)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed input: {0}")]
    Parse(#[from] ParseError),

    #[error("serde error")]
    Serde(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}
