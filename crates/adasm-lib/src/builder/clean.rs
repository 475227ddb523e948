//! Graph cleaning passes
//!
//! Sequencing errors show up as shallow k-mers hanging off (or sitting next
//! to) deep true k-mers. Four passes remove them, always in this order:
//!
//! 1. Low depth: count below a threshold
//! 2. Tips: a dead end whose deepest neighbour is more than 2x deeper
//! 3. Large local difference: any neighbour more than 5x deeper
//! 4. Singletons: no neighbour other than itself
//!
//! Each pass decides every removal against the store as it was when the
//! pass started, then removes them all at once. Passes run once; nodes
//! exposed as tips or singletons by a later pass are left alone.

use crate::adjacency::{downstream, neighbors, upstream};
use crate::builder::config::DepthFilter;
use crate::constants::{LARGE_DIFF_DEPTH_RATIO, TIP_DEPTH_RATIO};
use crate::encoding::KmerCode;
use crate::kmer_counts::{Depth, KmerCounts};
use tracing::info;

/// Number of nodes removed by each pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleaningReport {
    /// Threshold resolved for the low-depth pass
    pub min_depth: Depth,
    /// Removed by the low-depth pass
    pub low_depth: usize,
    /// Removed by tip pruning
    pub tips: usize,
    /// Removed by the large-difference pass
    pub large_diff: usize,
    /// Removed by the singleton pass
    pub singletons: usize,
    /// Nodes left after the last pass
    pub remaining: usize,
}

impl CleaningReport {
    /// Total nodes removed across all passes
    pub fn total_removed(&self) -> usize {
        self.low_depth + self.tips + self.large_diff + self.singletons
    }
}

/// Runs the fixed pass sequence over a [`KmerCounts`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Cleaner {
    depth_filter: DepthFilter,
}

impl Cleaner {
    /// Create a cleaner whose first pass uses `depth_filter`
    pub fn new(depth_filter: DepthFilter) -> Self {
        Self { depth_filter }
    }

    /// Run all four passes in order
    pub fn run(&self, counts: &mut KmerCounts) -> CleaningReport {
        let mut report = CleaningReport {
            min_depth: self.depth_filter.threshold(counts),
            ..CleaningReport::default()
        };
        info!("Cleaning {}-mer graph ({} nodes)", counts.k(), counts.size());

        report.low_depth = remove_low_depth(counts, report.min_depth);
        info!(
            "  removed {} k-mers with depth below {}, {} remain",
            report.low_depth,
            report.min_depth,
            counts.size()
        );

        report.tips = remove_tips(counts);
        info!("  removed {} tips, {} remain", report.tips, counts.size());

        report.large_diff = remove_large_differences(counts);
        info!(
            "  removed {} k-mers next to much deeper k-mers, {} remain",
            report.large_diff,
            counts.size()
        );

        report.singletons = remove_singletons(counts);
        info!("  removed {} singletons, {} remain", report.singletons, counts.size());

        report.remaining = counts.size();
        report
    }
}

/// Collect the codes matching `doomed` over an unchanging store, then remove them
fn remove_where<F>(counts: &mut KmerCounts, doomed: F) -> usize
where
    F: Fn(&KmerCounts, KmerCode, Depth) -> bool,
{
    let snapshot: &KmerCounts = counts;
    let to_remove: Vec<KmerCode> = snapshot
        .iter()
        .filter(|&(code, count)| doomed(snapshot, code, count))
        .map(|(code, _)| code)
        .collect();
    counts.remove_all(to_remove)
}

/// Remove every k-mer with a count below `min_depth`
pub fn remove_low_depth(counts: &mut KmerCounts, min_depth: Depth) -> usize {
    remove_where(counts, |_, _, count| count < min_depth)
}

/// Remove dead ends much shallower than the node they hang off.
///
/// With no downstream neighbours, the node goes if its deepest upstream
/// neighbour is more than twice as deep; likewise with no upstream
/// neighbours against the downstream ones. An isolated node has nothing
/// deeper beside it and stays.
pub fn remove_tips(counts: &mut KmerCounts) -> usize {
    remove_where(counts, |counts, code, count| {
        let limit = TIP_DEPTH_RATIO * count as u64;
        let up = upstream(counts, code);
        let down = downstream(counts, code);
        (down.is_empty() && up.max_count(counts) as u64 > limit)
            || (up.is_empty() && down.max_count(counts) as u64 > limit)
    })
}

/// Remove k-mers with any neighbour more than five times deeper
pub fn remove_large_differences(counts: &mut KmerCounts) -> usize {
    remove_where(counts, |counts, code, count| {
        let limit = LARGE_DIFF_DEPTH_RATIO * count as u64;
        neighbors(counts, code).any(|n| counts.count_of(n) as u64 > limit)
    })
}

/// Remove k-mers with no neighbour other than themselves
pub fn remove_singletons(counts: &mut KmerCounts) -> usize {
    remove_where(counts, |counts, code, _| neighbors(counts, code).all(|n| n == code))
}
