//! DNA k-mer encoding
//!
//! Packs a fixed-length window of bases into a `u32`, two bits per base,
//! with the first base in the most significant position:
//! - A (65/97)  -> 00
//! - C (67/99)  -> 01
//! - G (71/103) -> 10
//! - T (84/116) -> 11
//!
//! Any other byte (N, IUPAC ambiguity codes, gaps) encodes as A. Read ends
//! are full of such bases and the graph output depends on this mapping, so
//! it is reproduced as-is rather than rejected.

use crate::constants::{is_valid_k, MAX_K};
use thiserror::Error;

/// Packed k-mer: up to 16 bases, most significant base first
pub type KmerCode = u32;

/// The four bases in code order, used wherever neighbours are enumerated
pub const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Error type for codec construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The k-mer length does not fit in a 32-bit code
    #[error("k-mer length {0} is out of range [1, 16]")]
    InvalidK(usize),
}

/// Encode a single base to 2 bits (A=00, C=01, G=10, T=11, anything else 00)
#[inline]
pub const fn encode_base(base: u8) -> KmerCode {
    match base {
        b'C' | b'c' => 0b01,
        b'G' | b'g' => 0b10,
        b'T' | b't' => 0b11,
        _ => 0b00,
    }
}

/// Decode a 2-bit value to an uppercase base
#[inline]
pub const fn decode_base(bits: KmerCode) -> u8 {
    BASES[(bits & 0b11) as usize]
}

/// Bidirectional mapping between length-`k` windows and packed codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmerCodec {
    k: usize,
    mask: KmerCode,
}

impl KmerCodec {
    /// Create a codec for k-mers of length `k`
    pub fn new(k: usize) -> Result<Self, EncodingError> {
        if !is_valid_k(k) {
            return Err(EncodingError::InvalidK(k));
        }
        let mask = if k == MAX_K {
            KmerCode::MAX
        } else {
            (1 << (2 * k)) - 1
        };
        Ok(Self { k, mask })
    }

    /// K-mer length
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Mask covering the low `2k` bits of a code
    #[inline]
    pub fn mask(&self) -> KmerCode {
        self.mask
    }

    /// Encode the first `k` bases of `window`.
    ///
    /// Callers must pass at least `k` bytes; a shorter window yields a code
    /// for the bases that are present and is not meaningful.
    #[inline]
    pub fn encode(&self, window: &[u8]) -> KmerCode {
        debug_assert!(window.len() >= self.k, "window shorter than k");
        window
            .iter()
            .take(self.k)
            .fold(0, |code, &base| (code << 2) | encode_base(base))
    }

    /// Decode a code back to exactly `k` uppercase bases
    pub fn decode(&self, code: KmerCode) -> String {
        let mut s = String::with_capacity(self.k);
        for i in (0..self.k).rev() {
            s.push(decode_base(code >> (2 * i)) as char);
        }
        s
    }
}
