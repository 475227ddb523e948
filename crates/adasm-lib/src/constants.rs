//! Constants and configuration defaults
//!
//! This module defines the default option values, the k-mer size limits of
//! the 32-bit code, and the fixed ratios used by the graph-cleaning passes.

/// Default k-mer length
pub const DEFAULT_K: usize = 10;

/// Default number of bases considered from the anchored end of each read
pub const DEFAULT_MARGIN: usize = 250;

/// Default low-depth threshold, as a fraction of the deepest k-mer
pub const DEFAULT_MIN_DEPTH_FRACTION: f64 = 0.05;

/// Minimum k-mer size supported
pub const MIN_K: usize = 1;

/// Maximum k-mer size supported (2 bits per base in a `u32` code)
pub const MAX_K: usize = 16;

/// A dead-end node is a tip if its deepest neighbour exceeds this multiple of its own depth
pub const TIP_DEPTH_RATIO: u64 = 2;

/// A node is noise if any neighbour exceeds this multiple of its own depth
pub const LARGE_DIFF_DEPTH_RATIO: u64 = 5;

/// Progress is reported each time this many more bases have been read.
/// A prime, so the reported numbers don't look rounded off.
pub const PROGRESS_INTERVAL_BASES: u64 = 483_611;

/// Version number
pub const VERSION: (u8, u8, u8) = (0, 1, 0);

/// Check if a k-mer size fits the 32-bit code
#[inline]
pub const fn is_valid_k(k: usize) -> bool {
    k >= MIN_K && k <= MAX_K
}
