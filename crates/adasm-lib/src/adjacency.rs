//! Implicit de Bruijn graph adjacency
//!
//! Edges are never stored. Node `Y` follows node `X` when `Y` is present in
//! the [`KmerCounts`] and equals `X` with its first base dropped and one base
//! appended; `upstream` is the mirror image. Both are recomputed from the
//! store on every call, so removing a node needs no edge bookkeeping.
//!
//! Candidates are generated in A, C, G, T order. That order is part of the
//! output format: links are written in it.

use crate::encoding::KmerCode;
use crate::kmer_counts::{Depth, KmerCounts};

/// Up to four neighbouring codes, in A, C, G, T candidate order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbors {
    codes: [KmerCode; 4],
    len: usize,
}

impl Neighbors {
    #[inline]
    fn push(&mut self, code: KmerCode) {
        self.codes[self.len] = code;
        self.len += 1;
    }

    /// The neighbouring codes
    #[inline]
    pub fn as_slice(&self) -> &[KmerCode] {
        &self.codes[..self.len]
    }

    /// Iterate over the neighbouring codes
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = KmerCode> + '_ {
        self.as_slice().iter().copied()
    }

    /// Number of neighbours (0..=4)
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no neighbours
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Deepest count among the neighbours, 0 if there are none
    pub fn max_count(&self, counts: &KmerCounts) -> Depth {
        self.iter().map(|c| counts.count_of(c)).max().unwrap_or(0)
    }
}

/// Present k-mers that overlap `code` by `k - 1` bases on its right
pub fn downstream(counts: &KmerCounts, code: KmerCode) -> Neighbors {
    let shifted = (code << 2) & counts.codec().mask();
    let mut out = Neighbors::default();
    for base in 0..4 {
        let candidate = shifted | base;
        if counts.contains(candidate) {
            out.push(candidate);
        }
    }
    out
}

/// Present k-mers that overlap `code` by `k - 1` bases on its left
pub fn upstream(counts: &KmerCounts, code: KmerCode) -> Neighbors {
    let lead_shift = 2 * (counts.k() - 1);
    let shifted = code >> 2;
    let mut out = Neighbors::default();
    for base in 0..4 {
        let candidate = (base << lead_shift) | shifted;
        if counts.contains(candidate) {
            out.push(candidate);
        }
    }
    out
}

/// Upstream followed by downstream neighbours.
///
/// A code can appear twice (e.g. `ACA` is both upstream and downstream of
/// `CAC`); that doesn't matter to any caller, which only take maxima or test
/// for emptiness.
pub fn neighbors(counts: &KmerCounts, code: KmerCode) -> impl Iterator<Item = KmerCode> {
    let up = upstream(counts, code);
    let down = downstream(counts, code);
    up.codes
        .into_iter()
        .take(up.len)
        .chain(down.codes.into_iter().take(down.len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_from(k: usize, kmers: &[&str]) -> KmerCounts {
        let mut counts = KmerCounts::new(k).unwrap();
        for kmer in kmers {
            let code = counts.codec().encode(kmer.as_bytes());
            counts.increment(code);
        }
        counts
    }

    fn decoded(counts: &KmerCounts, n: Neighbors) -> Vec<String> {
        n.iter().map(|c| counts.codec().decode(c)).collect()
    }

    #[test]
    fn test_downstream_in_base_order() {
        let counts = counts_from(4, &["ACGT", "CGTT", "CGTA", "CGTG", "GTTA"]);
        let code = counts.codec().encode(b"ACGT");
        let down = downstream(&counts, code);
        assert_eq!(decoded(&counts, down), vec!["CGTA", "CGTG", "CGTT"]);
    }

    #[test]
    fn test_upstream_in_base_order() {
        let counts = counts_from(4, &["ACGT", "TACG", "GACG", "CACG"]);
        let code = counts.codec().encode(b"ACGT");
        let up = upstream(&counts, code);
        assert_eq!(decoded(&counts, up), vec!["CACG", "GACG", "TACG"]);
    }

    #[test]
    fn test_absent_code_still_has_neighbours() {
        // adjacency only looks at the candidates, not the node itself
        let counts = counts_from(3, &["CGT"]);
        let code = counts.codec().encode(b"ACG");
        assert_eq!(decoded(&counts, downstream(&counts, code)), vec!["CGT"]);
        assert!(upstream(&counts, code).is_empty());
    }

    #[test]
    fn test_self_loop() {
        let counts = counts_from(3, &["AAA"]);
        let down = downstream(&counts, 0);
        let up = upstream(&counts, 0);
        assert_eq!(down.as_slice(), &[0]);
        assert_eq!(up.as_slice(), &[0]);
        assert_eq!(neighbors(&counts, 0).collect::<Vec<_>>(), vec![0, 0]);
    }

    #[test]
    fn test_removal_is_seen_immediately() {
        let mut counts = counts_from(3, &["ACG", "CGT"]);
        let acg = counts.codec().encode(b"ACG");
        let cgt = counts.codec().encode(b"CGT");
        assert_eq!(downstream(&counts, acg).len(), 1);
        assert_eq!(upstream(&counts, cgt).len(), 1);

        counts.remove_all([cgt]);
        assert!(downstream(&counts, acg).is_empty());
    }

    #[test]
    fn test_k1_every_node_is_adjacent() {
        let counts = counts_from(1, &["A", "C", "T"]);
        let down = downstream(&counts, 2);
        let up = upstream(&counts, 2);
        assert_eq!(down.as_slice(), &[0, 1, 3]);
        assert_eq!(up.as_slice(), &[0, 1, 3]);
    }

    #[test]
    fn test_k16_top_bits() {
        let counts = counts_from(16, &["TAAAAAAAAAAAAAAA", "AAAAAAAAAAAAAAAC"]);
        let all_a = counts.codec().encode(b"AAAAAAAAAAAAAAAA");
        assert_eq!(decoded(&counts, upstream(&counts, all_a)), vec!["TAAAAAAAAAAAAAAA"]);
        assert_eq!(decoded(&counts, downstream(&counts, all_a)), vec!["AAAAAAAAAAAAAAAC"]);
    }

    #[test]
    fn test_max_count() {
        let mut counts = counts_from(3, &["ACG", "CGA", "CGT", "CGT", "CGT"]);
        let acg = counts.codec().encode(b"ACG");
        assert_eq!(downstream(&counts, acg).max_count(&counts), 3);
        assert_eq!(upstream(&counts, acg).max_count(&counts), 0);

        let cgt = counts.codec().encode(b"CGT");
        counts.remove_all([cgt]);
        assert_eq!(downstream(&counts, acg).max_count(&counts), 1);
    }
}
