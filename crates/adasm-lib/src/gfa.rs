//! GFA output of the k-mer graph
//!
//! Writes the subset of GFA 1 that an adapter assembler needs: one `S` line
//! per k-mer and one `L` line per edge, every link a forward-forward overlap
//! of `k - 1` bases.
//!
//! ```text
//! S	0	AAA	dp:f:2
//! S	1	AAC	dp:f:1
//! L	0	+	0	+	2M
//! L	0	+	1	+	2M
//! ```
//!
//! Segment ids are the numeric k-mer codes. Segments come first, sorted by
//! id; links follow, grouped by source segment in the same order and by
//! target in A, C, G, T order. The same store always produces the same bytes.

use crate::adjacency::downstream;
use crate::kmer_counts::KmerCounts;
use std::io::{self, Write};

/// Number of records written
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GfaSummary {
    /// `S` lines
    pub segments: usize,
    /// `L` lines
    pub links: usize,
}

/// Write every node and downstream edge of `counts` as GFA
pub fn write_gfa<W: Write>(counts: &KmerCounts, writer: &mut W) -> io::Result<GfaSummary> {
    let codec = counts.codec();
    let overlap = counts.k() - 1;
    let codes = counts.sorted_codes();
    let mut summary = GfaSummary::default();

    for &code in &codes {
        writeln!(
            writer,
            "S\t{}\t{}\tdp:f:{}",
            code,
            codec.decode(code),
            counts.count_of(code)
        )?;
        summary.segments += 1;
    }

    for &code in &codes {
        for next in downstream(counts, code).iter() {
            writeln!(writer, "L\t{}\t+\t{}\t+\t{}M", code, next, overlap)?;
            summary.links += 1;
        }
    }

    Ok(summary)
}

/// Render the graph to a `String`
pub fn to_gfa_string(counts: &KmerCounts) -> io::Result<String> {
    let mut buf = Vec::new();
    write_gfa(counts, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
