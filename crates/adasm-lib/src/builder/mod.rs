//! Builder module for constructing cleaned k-mer graphs
//!
//! This module implements the build pipeline:
//! 1. Parse input reads (FASTA/FASTQ, optionally gzipped)
//! 2. Count k-mers from the anchored end of each read
//! 3. Clean the graph in four fixed passes
//! 4. Return the surviving k-mers for GFA output

pub mod config;
pub mod parse;
pub mod ingest;
pub mod clean;
pub mod graph_builder;

pub use config::{Anchor, ConfigError, DepthFilter, GraphConfiguration};
pub use ingest::{IngestSummary, Ingestor, LogProgress, NoProgress, ProgressSink};
pub use clean::{Cleaner, CleaningReport};
pub use graph_builder::{GraphBuilder, KmerGraph};
