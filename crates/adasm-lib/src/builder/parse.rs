//! FASTA/FASTQ parsing with automatic decompression
//!
//! Reads sequences from FASTA or FASTQ files, with transparent gzip
//! decompression. A record that fails to decode is logged and counted as
//! skipped rather than failing the run, and reading carries on with the
//! next record the reader can produce. needletail cannot resynchronise
//! after a malformed record, so in practice the rest of that input is
//! abandoned; the summary flags this and a warning names how many records
//! were kept. An empty file is an input with zero records.

use anyhow::{Context, Result};
use needletail::errors::ParseErrorKind;
use needletail::{parse_fastx_file, parse_fastx_reader, FastxReader};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Record totals for one parsed input
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseSummary {
    /// Records handed to the callback
    pub records: u64,
    /// Records that failed to decode
    pub skipped: u64,
    /// The input ended on an unreadable record, so anything after it was lost
    pub abandoned: bool,
}

/// Parse a FASTA/FASTQ file and call a function for each sequence
///
/// # Arguments
/// * `path` - Path to input file (may be gzipped)
/// * `callback` - Function called for each sequence, receives (name, sequence)
///
/// # Errors
/// Returns error if the file cannot be opened or the callback fails.
/// Malformed records are not errors.
pub fn parse_sequences<P, F>(path: P, callback: F) -> Result<ParseSummary>
where
    P: AsRef<Path>,
    F: FnMut(&[u8], &[u8]) -> Result<()>,
{
    let path = path.as_ref();
    let name = path.display().to_string();
    match parse_fastx_file(path) {
        Ok(reader) => read_records(reader, &name, callback),
        Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => {
            warn!("{} contains no sequences", name);
            Ok(ParseSummary::default())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to open sequence file: {}", path.display()))
        }
    }
}

/// Same as [`parse_sequences`] for an already-open byte stream
pub fn parse_sequences_from_reader<R, F>(
    reader: R,
    name: &str,
    callback: F,
) -> Result<ParseSummary>
where
    R: Read + Send + 'static,
    F: FnMut(&[u8], &[u8]) -> Result<()>,
{
    match parse_fastx_reader(reader) {
        Ok(reader) => read_records(reader, name, callback),
        Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => {
            warn!("{} contains no sequences", name);
            Ok(ParseSummary::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read sequences from {}", name)),
    }
}

fn read_records<F>(
    mut reader: Box<dyn FastxReader>,
    name: &str,
    mut callback: F,
) -> Result<ParseSummary>
where
    F: FnMut(&[u8], &[u8]) -> Result<()>,
{
    let mut summary = ParseSummary::default();
    let mut last_failed = false;

    while let Some(record) = reader.next() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable record in {}: {}", name, e);
                summary.skipped += 1;
                last_failed = true;
                continue;
            }
        };
        last_failed = false;

        let seq = record.seq();
        callback(record.id(), &seq)?;
        summary.records += 1;
    }

    if last_failed {
        summary.abandoned = true;
        warn!(
            "Abandoned the rest of {} after an unreadable record ({} records kept)",
            name, summary.records
        );
    }

    Ok(summary)
}
