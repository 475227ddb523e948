//! Run configuration for k-mer graph construction
//!
//! Holds the k-mer length, how reads are windowed, and how the low-depth
//! threshold of the first cleaning pass is chosen.

use crate::constants::{
    is_valid_k, DEFAULT_K, DEFAULT_MARGIN, DEFAULT_MIN_DEPTH_FRACTION, MAX_K, MIN_K,
};
use crate::encoding::EncodingError;
use crate::kmer_counts::{Depth, KmerCounts};
use std::fmt;
use thiserror::Error;

/// Error type for invalid configurations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// K-mer length outside what a 32-bit code can hold
    #[error("k must be in range [{min}, {max}], got k={k}")]
    InvalidK {
        /// Requested k
        k: usize,
        /// Smallest supported k
        min: usize,
        /// Largest supported k
        max: usize,
    },
    /// Depth fraction that is negative, above 1 or not a number
    #[error("min depth fraction must be in range [0, 1], got {0}")]
    InvalidFraction(f64),
    /// Codec could not be built
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Which end of each read is sampled for k-mers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The first `margin` bases
    Start,
    /// The last `margin` bases
    End,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Start => f.write_str("start"),
            Anchor::End => f.write_str("end"),
        }
    }
}

/// How the low-depth cleaning threshold is computed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthFilter {
    /// Remove k-mers seen fewer than this many times
    Absolute(Depth),
    /// Remove k-mers below `round(max_count * fraction)`
    FractionOfMax(f64),
}

impl DepthFilter {
    /// Resolve the threshold against the current store
    pub fn threshold(&self, counts: &KmerCounts) -> Depth {
        match *self {
            DepthFilter::Absolute(min_depth) => min_depth,
            DepthFilter::FractionOfMax(fraction) => {
                (counts.max_count() as f64 * fraction).round() as Depth
            }
        }
    }
}

impl Default for DepthFilter {
    fn default() -> Self {
        DepthFilter::FractionOfMax(DEFAULT_MIN_DEPTH_FRACTION)
    }
}

impl fmt::Display for DepthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthFilter::Absolute(d) => write!(f, "absolute {}", d),
            DepthFilter::FractionOfMax(x) => write!(f, "{} x max depth", x),
        }
    }
}

/// Configuration parameters for building a k-mer graph
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfiguration {
    /// K-mer length (between 1 and 16)
    pub k: usize,

    /// Number of bases from the anchored end that are windowed
    pub margin: usize,

    /// Read end to take k-mers from
    pub anchor: Anchor,

    /// Threshold for the low-depth cleaning pass
    pub depth_filter: DepthFilter,
}

impl Default for GraphConfiguration {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            margin: DEFAULT_MARGIN,
            anchor: Anchor::End,
            depth_filter: DepthFilter::default(),
        }
    }
}

impl GraphConfiguration {
    /// Create a validated configuration with the given k-mer length and anchor
    pub fn new(k: usize, anchor: Anchor) -> Result<Self, ConfigError> {
        let config = Self {
            k,
            anchor,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_k(self.k) {
            return Err(ConfigError::InvalidK {
                k: self.k,
                min: MIN_K,
                max: MAX_K,
            });
        }
        if let DepthFilter::FractionOfMax(fraction) = self.depth_filter {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(ConfigError::InvalidFraction(fraction));
            }
        }
        Ok(())
    }

    /// Log configuration parameters via tracing
    pub fn print(&self) {
        tracing::info!("Graph Configuration:");
        tracing::info!("  k = {}", self.k);
        tracing::info!("  anchor = {}", self.anchor);
        tracing::info!("  margin = {}", self.margin);
        tracing::debug!("  depth filter = {}", self.depth_filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_with_max(max: Depth) -> KmerCounts {
        let mut counts = KmerCounts::new(3).unwrap();
        for _ in 0..max {
            counts.increment(1);
        }
        counts.increment(2);
        counts
    }

    #[test]
    fn test_default_config() {
        let config = GraphConfiguration::default();
        assert_eq!(config.k, 10);
        assert_eq!(config.margin, 250);
        assert_eq!(config.depth_filter, DepthFilter::FractionOfMax(0.05));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_config() {
        let config = GraphConfiguration::new(12, Anchor::Start).unwrap();
        assert_eq!(config.k, 12);
        assert_eq!(config.anchor, Anchor::Start);
        assert_eq!(config.margin, 250);
    }

    #[test]
    fn test_validate_k_out_of_range() {
        assert_eq!(
            GraphConfiguration::new(0, Anchor::End),
            Err(ConfigError::InvalidK { k: 0, min: 1, max: 16 })
        );
        assert!(GraphConfiguration::new(17, Anchor::End).is_err());
        assert!(GraphConfiguration::new(16, Anchor::End).is_ok());
    }

    #[test]
    fn test_validate_fraction() {
        let mut config = GraphConfiguration::default();
        config.depth_filter = DepthFilter::FractionOfMax(1.5);
        assert!(config.validate().is_err());
        config.depth_filter = DepthFilter::FractionOfMax(-0.1);
        assert!(config.validate().is_err());
        config.depth_filter = DepthFilter::FractionOfMax(f64::NAN);
        assert!(config.validate().is_err());
        config.depth_filter = DepthFilter::FractionOfMax(0.0);
        assert!(config.validate().is_ok());
        config.depth_filter = DepthFilter::Absolute(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_absolute_threshold_ignores_counts() {
        let filter = DepthFilter::Absolute(7);
        assert_eq!(filter.threshold(&counts_with_max(100)), 7);
        assert_eq!(filter.threshold(&KmerCounts::new(3).unwrap()), 7);
    }

    #[test]
    fn test_fraction_threshold_rounds() {
        // 0.05 * 100 = 5
        assert_eq!(DepthFilter::FractionOfMax(0.05).threshold(&counts_with_max(100)), 5);
        // 0.05 * 30 = 1.5 rounds up
        assert_eq!(DepthFilter::FractionOfMax(0.05).threshold(&counts_with_max(30)), 2);
        // 0.05 * 29 = 1.45 rounds down
        assert_eq!(DepthFilter::FractionOfMax(0.05).threshold(&counts_with_max(29)), 1);
        // empty store
        assert_eq!(DepthFilter::FractionOfMax(0.5).threshold(&KmerCounts::new(3).unwrap()), 0);
    }
}
