//! Graph builder orchestration
//!
//! Coordinates one run:
//! 1. Count anchored k-mers from every input, in order
//! 2. Clean the graph (low depth, tips, large differences, singletons)
//! 3. Hand back the surviving k-mers for GFA output
//!
//! All ingestion finishes before cleaning starts.

use crate::builder::clean::{Cleaner, CleaningReport};
use crate::builder::config::{ConfigError, GraphConfiguration};
use crate::builder::ingest::{IngestSummary, Ingestor, LogProgress, NoProgress, ProgressSink};
use crate::builder::parse::parse_sequences;
use crate::encoding::KmerCodec;
use crate::gfa::{write_gfa, GfaSummary};
use crate::kmer_counts::KmerCounts;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// A cleaned k-mer graph and how it was obtained
#[derive(Debug, Clone)]
pub struct KmerGraph {
    /// Surviving k-mers and their depths
    pub counts: KmerCounts,
    /// Totals over all ingested inputs
    pub ingest: IngestSummary,
    /// Per-pass removal counts
    pub cleaning: CleaningReport,
}

impl KmerGraph {
    /// Write the graph as GFA
    pub fn write_gfa<W: Write>(&self, writer: &mut W) -> std::io::Result<GfaSummary> {
        write_gfa(&self.counts, writer)
    }
}

/// Builder for k-mer graphs
pub struct GraphBuilder {
    config: GraphConfiguration,
    codec: KmerCodec,
}

impl GraphBuilder {
    /// Create a new graph builder with the given configuration
    pub fn new(config: GraphConfiguration) -> Result<Self, ConfigError> {
        config.validate()?;
        let codec = KmerCodec::new(config.k)?;
        Ok(Self { config, codec })
    }

    /// Build a graph from FASTA/FASTQ files, logging progress
    pub fn build_from_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<KmerGraph> {
        self.build_from_files_with_progress(paths, LogProgress)
    }

    /// Build a graph from FASTA/FASTQ files, reporting progress to `progress`
    pub fn build_from_files_with_progress<P, S>(
        &self,
        paths: &[P],
        progress: S,
    ) -> Result<KmerGraph>
    where
        P: AsRef<Path>,
        S: ProgressSink,
    {
        self.config.print();
        let mut counts = KmerCounts::with_codec(self.codec);
        let mut total = IngestSummary::default();
        {
            let mut ingestor =
                Ingestor::new(&mut counts, self.config.anchor, self.config.margin, progress);
            for path in paths {
                let path = path.as_ref();
                ingestor.start_source(&path.display().to_string());
                let parsed = parse_sequences(path, |_id, seq| {
                    ingestor.add_sequence(seq);
                    Ok(())
                })
                .with_context(|| format!("Failed to ingest {}", path.display()))?;
                ingestor.add_skipped(parsed.skipped);
                total.merge(&ingestor.finish_source());
            }
        }
        Ok(self.finish(counts, total))
    }

    /// Build a graph from in-memory sequences
    pub fn build_from_sequences<I, S>(&self, sequences: I) -> KmerGraph
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut counts = KmerCounts::with_codec(self.codec);
        let total = Ingestor::new(
            &mut counts,
            self.config.anchor,
            self.config.margin,
            NoProgress,
        )
        .ingest("sequences", sequences);
        self.finish(counts, total)
    }

    fn finish(&self, mut counts: KmerCounts, ingest: IngestSummary) -> KmerGraph {
        info!(
            "Counted {} windows from {} reads into {} distinct {}-mers",
            ingest.windows,
            ingest.sequences,
            counts.size(),
            counts.k()
        );
        let cleaning = Cleaner::new(self.config.depth_filter).run(&mut counts);
        info!(
            "Graph cleaned: {} k-mers removed, {} remain",
            cleaning.total_removed(),
            cleaning.remaining
        );
        KmerGraph {
            counts,
            ingest,
            cleaning,
        }
    }
}
