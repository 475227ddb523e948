//! K-mer occurrence counts: the node set of the graph
//!
//! Every present code has a count of at least 1. Nodes are only ever added
//! by [`KmerCounts::increment`] and taken away by [`KmerCounts::remove_all`];
//! there is no way to store a zero count.
//!
//! Iteration order is that of the underlying hash map and carries no meaning.
//! Anything that needs a stable order (GFA output) sorts explicitly via
//! [`KmerCounts::sorted_codes`].

use crate::encoding::{EncodingError, KmerCode, KmerCodec};
use ahash::AHashMap;

/// Occurrence count of a k-mer across all ingested windows
pub type Depth = u32;

/// Mapping from packed k-mer code to occurrence count, bound to one k
#[derive(Debug, Clone)]
pub struct KmerCounts {
    codec: KmerCodec,
    counts: AHashMap<KmerCode, Depth>,
}

impl KmerCounts {
    /// Create an empty store for k-mers of length `k`
    pub fn new(k: usize) -> Result<Self, EncodingError> {
        Ok(Self::with_codec(KmerCodec::new(k)?))
    }

    /// Create an empty store sharing an existing codec
    pub fn with_codec(codec: KmerCodec) -> Self {
        Self {
            codec,
            counts: AHashMap::new(),
        }
    }

    /// K-mer length of every key in this store
    #[inline]
    pub fn k(&self) -> usize {
        self.codec.k()
    }

    /// Codec matching this store's k
    #[inline]
    pub fn codec(&self) -> &KmerCodec {
        &self.codec
    }

    /// Record one more occurrence of `code`
    #[inline]
    pub fn increment(&mut self, code: KmerCode) {
        *self.counts.entry(code).or_insert(0) += 1;
    }

    /// Whether `code` is a node of the graph
    #[inline]
    pub fn contains(&self, code: KmerCode) -> bool {
        self.counts.contains_key(&code)
    }

    /// Count of `code`, or 0 if absent
    #[inline]
    pub fn count_of(&self, code: KmerCode) -> Depth {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    /// Remove every listed code; codes not present are ignored.
    ///
    /// Returns how many nodes were actually removed.
    pub fn remove_all<I>(&mut self, codes: I) -> usize
    where
        I: IntoIterator<Item = KmerCode>,
    {
        codes
            .into_iter()
            .filter(|code| self.counts.remove(code).is_some())
            .count()
    }

    /// Largest count in the store, 0 if empty
    pub fn max_count(&self) -> Depth {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Number of distinct codes
    #[inline]
    pub fn size(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no k-mer has been counted (or all were removed)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(code, count)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (KmerCode, Depth)> + '_ {
        self.counts.iter().map(|(&code, &count)| (code, count))
    }

    /// All codes in ascending numeric order
    pub fn sorted_codes(&self) -> Vec<KmerCode> {
        let mut codes: Vec<KmerCode> = self.counts.keys().copied().collect();
        codes.sort_unstable();
        codes
    }
}
