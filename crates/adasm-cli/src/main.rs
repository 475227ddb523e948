use adasm_lib::constants::{DEFAULT_K, DEFAULT_MARGIN, DEFAULT_MIN_DEPTH_FRACTION};
use adasm_lib::{Anchor, DepthFilter, GraphBuilder, GraphConfiguration};
use anyhow::Context;
use clap::{ArgGroup, Parser};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "adasm")]
#[command(version = "0.1.0")]
#[command(
    about = "Build a cleaned k-mer graph from one end of sequencing reads",
    long_about = None
)]
#[command(group(ArgGroup::new("anchor").required(true).args(["start", "end"])))]
struct Cli {
    /// Input reads (FASTA/FASTQ, may be gzipped)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// K-mer length (1 to 16)
    #[arg(short, long = "kmer", default_value_t = DEFAULT_K)]
    k: usize,

    /// Number of bases at the read end to take k-mers from
    #[arg(long, default_value_t = DEFAULT_MARGIN)]
    margin: usize,

    /// Take k-mers from the start of reads
    #[arg(long)]
    start: bool,

    /// Take k-mers from the end of reads
    #[arg(long)]
    end: bool,

    /// Remove k-mers seen fewer than this many times
    #[arg(long, conflicts_with = "min_depth_fraction")]
    min_depth: Option<u32>,

    /// Remove k-mers below this fraction of the deepest k-mer's count
    #[arg(long, default_value_t = DEFAULT_MIN_DEPTH_FRACTION)]
    min_depth_fraction: f64,

    /// Write the graph here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // stdout carries the graph, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    for input in &cli.inputs {
        if !input.is_file() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    let anchor = if cli.start { Anchor::Start } else { Anchor::End };
    let depth_filter = match cli.min_depth {
        Some(min_depth) => DepthFilter::Absolute(min_depth),
        None => DepthFilter::FractionOfMax(cli.min_depth_fraction),
    };
    let config = GraphConfiguration {
        k: cli.k,
        margin: cli.margin,
        anchor,
        depth_filter,
    };

    let builder = GraphBuilder::new(config).context("Invalid options")?;
    let graph = builder.build_from_files(&cli.inputs)?;

    let summary = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let summary = graph.write_gfa(&mut writer)?;
            writer.flush()?;
            info!("Wrote graph to {}", path.display());
            summary
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            let summary = graph.write_gfa(&mut writer)?;
            writer.flush()?;
            summary
        }
    };
    info!("{} segments, {} links", summary.segments, summary.links);

    Ok(())
}
