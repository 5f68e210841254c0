use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use hdroute::{
    driver::{self, read_batch, read_batch_from, write_report},
    Config, Format,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hdroute")]
#[command(about = "Greedy flow routing over half-duplex capacitated links")]
struct Args {
    /// Batch input file; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Opaque token printed as the first report line
    #[arg(long)]
    header: Option<String>,

    /// Report format: text or json
    #[arg(short, long, default_value = "text")]
    format: Format,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout is reserved for the report
    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let instances = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            read_batch(path).with_context(|| format!("reading {}", path.display()))?
        }
        _ => read_batch_from(io::stdin().lock()).context("reading stdin")?,
    };
    info!(instances = instances.len(), "loaded batch");

    let cfg = match args.header {
        Some(header) => Config::builder().header(header).format(args.format).build(),
        None => Config::builder().format(args.format).build(),
    };
    let report = driver::run(&cfg, &instances);

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_report(&cfg, &report, BufWriter::new(file))?;
        }
        None => write_report(&cfg, &report, BufWriter::new(io::stdout().lock()))?,
    }
    Ok(())
}
