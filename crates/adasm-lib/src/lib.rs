// adasm: anchored k-mer graphs for adapter assembly
//
// Counts k-mers near one end of sequencing reads, removes error k-mers
// from the resulting de Bruijn graph and writes what remains as GFA.

#![warn(missing_docs)]
//! Anchored k-mer graph construction for adapter assembly.
//!
//! ```
//! use adasm_lib::{Anchor, DepthFilter, GraphBuilder, GraphConfiguration};
//!
//! let config = GraphConfiguration {
//!     k: 3,
//!     anchor: Anchor::Start,
//!     depth_filter: DepthFilter::Absolute(1),
//!     ..GraphConfiguration::default()
//! };
//! let graph = GraphBuilder::new(config)?.build_from_sequences(["AAACAAA"]);
//! assert_eq!(graph.counts.size(), 4);
//! # Ok::<(), adasm_lib::ConfigError>(())
//! ```

pub mod constants;
pub mod encoding;
pub mod kmer_counts;
pub mod adjacency;
pub mod builder;
pub mod gfa;

// Re-export common types at crate root
pub use encoding::{EncodingError, KmerCode, KmerCodec};
pub use kmer_counts::{Depth, KmerCounts};
pub use adjacency::{downstream, neighbors, upstream, Neighbors};
pub use builder::{
    Anchor, Cleaner, CleaningReport, ConfigError, DepthFilter, GraphBuilder, GraphConfiguration,
    IngestSummary, KmerGraph,
};
pub use gfa::{to_gfa_string, write_gfa, GfaSummary};

/// Version information
pub fn version() -> (u8, u8, u8) {
    constants::VERSION
}
