//! Window extraction from read ends
//!
//! Each read contributes the length-k windows that fit entirely inside its
//! anchored region: the first `margin` bases for [`Anchor::Start`], the last
//! `margin` bases for [`Anchor::End`]. Reads shorter than k (or a margin
//! smaller than k) contribute nothing.

use crate::builder::config::Anchor;
use crate::constants::PROGRESS_INTERVAL_BASES;
use crate::kmer_counts::KmerCounts;
use std::ops::Range;
use tracing::info;

/// Window start positions for a read of length `len`.
///
/// The range is empty when no full window fits in the anchored region.
pub fn window_range(len: usize, k: usize, anchor: Anchor, margin: usize) -> Range<usize> {
    match anchor {
        Anchor::Start => 0..(margin.min(len) + 1).saturating_sub(k),
        Anchor::End => len.saturating_sub(margin)..(len + 1).saturating_sub(k),
    }
}

/// Receiver of cumulative base counts while a source is being read
pub trait ProgressSink {
    /// `bases` is the running total for `source`, not an increment
    fn report(&mut self, source: &str, bases: u64);
}

/// Logs progress at `info` level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&mut self, source: &str, bases: u64) {
        info!("  {} ({} bp)", source, bases);
    }
}

/// Discards progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _source: &str, _bases: u64) {}
}

/// Totals for one ingested source
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Sequences read
    pub sequences: u64,
    /// Bases read, over whole sequences (not only the anchored region)
    pub bases: u64,
    /// Windows counted into the store
    pub windows: u64,
    /// Records that could not be decoded and were skipped
    pub skipped: u64,
}

impl IngestSummary {
    /// Add another summary's totals to this one
    pub fn merge(&mut self, other: &IngestSummary) {
        self.sequences += other.sequences;
        self.bases += other.bases;
        self.windows += other.windows;
        self.skipped += other.skipped;
    }
}

/// Feeds anchored windows of each sequence into a [`KmerCounts`]
pub struct Ingestor<'a, P: ProgressSink> {
    counts: &'a mut KmerCounts,
    anchor: Anchor,
    margin: usize,
    progress: P,
    source: String,
    summary: IngestSummary,
    last_progress: u64,
}

impl<'a, P: ProgressSink> Ingestor<'a, P> {
    /// Create an ingestor writing into `counts`
    pub fn new(counts: &'a mut KmerCounts, anchor: Anchor, margin: usize, progress: P) -> Self {
        Self {
            counts,
            anchor,
            margin,
            progress,
            source: String::new(),
            summary: IngestSummary::default(),
            last_progress: 0,
        }
    }

    /// Begin a new named source, resetting the per-source totals
    pub fn start_source(&mut self, name: &str) {
        let side = match self.anchor {
            Anchor::Start => "starts",
            Anchor::End => "ends",
        };
        info!("Hashing {}-mers from {} {}", self.counts.k(), name, side);
        self.source = name.to_string();
        self.summary = IngestSummary::default();
        self.last_progress = 0;
    }

    /// Count the anchored windows of one sequence; returns how many were counted
    pub fn add_sequence(&mut self, seq: &[u8]) -> usize {
        let k = self.counts.k();
        let range = window_range(seq.len(), k, self.anchor, self.margin);
        let mut added = 0;
        for start in range {
            let code = self.counts.codec().encode(&seq[start..start + k]);
            self.counts.increment(code);
            added += 1;
        }

        self.summary.sequences += 1;
        self.summary.bases += seq.len() as u64;
        self.summary.windows += added as u64;
        if self.summary.bases - self.last_progress >= PROGRESS_INTERVAL_BASES {
            self.last_progress = self.summary.bases;
            self.progress.report(&self.source, self.summary.bases);
        }
        added
    }

    /// Note a record that was skipped by the reader
    pub fn add_skipped(&mut self, n: u64) {
        self.summary.skipped += n;
    }

    /// Close the current source and return its totals
    pub fn finish_source(&mut self) -> IngestSummary {
        self.progress.report(&self.source, self.summary.bases);
        info!(
            "  {} reads, {} {}-mers",
            self.summary.sequences,
            self.counts.size(),
            self.counts.k()
        );
        if self.summary.skipped > 0 {
            info!("  {} unreadable records skipped", self.summary.skipped);
        }
        std::mem::take(&mut self.summary)
    }

    /// Ingest a whole in-memory source
    pub fn ingest<I, S>(&mut self, name: &str, sequences: I) -> IngestSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.start_source(name);
        for seq in sequences {
            self.add_sequence(seq.as_ref());
        }
        self.finish_source()
    }
}
