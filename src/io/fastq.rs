use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use needletail::parser::{FastqReader, SequenceRecord};
use needletail::FastxReader;
use thiserror::Error;

use super::{create_output, OutputOpts};
use crate::filter::{filter_with_summary, FilterOpts, FilterSummary, ReadEntry, PHRED_OFFSET};

#[derive(Error, Debug)]
pub enum FastqError {
    #[error("record `{id}` has {seq_len} bases but {qual_len} quality scores")]
    UnequalLengths {
        id: String,
        seq_len: usize,
        qual_len: usize,
    },

    #[error("record `{id}` has no quality line")]
    MissingQuality { id: String },

    #[error("record `{id}` has quality byte {byte:#04x} at position {position}, below Phred+33 '!'")]
    InvalidQuality { id: String, position: usize, byte: u8 },
}

/// Converts a parsed record into an owned [`ReadEntry`], checking that the sequence and
/// quality strings line up.
fn read_entry(rec: &SequenceRecord) -> Result<ReadEntry> {
    let id = String::from_utf8(rec.id().to_vec()).context("Read identifier is not UTF-8")?;
    let seq = String::from_utf8(rec.seq().to_vec())
        .with_context(|| format!("Sequence of `{id}` is not UTF-8"))?;

    let Some(qual) = rec.qual() else {
        return Err(FastqError::MissingQuality { id }.into());
    };
    let qual = String::from_utf8(qual.to_vec())
        .with_context(|| format!("Quality of `{id}` is not UTF-8"))?;

    if seq.len() != qual.len() {
        return Err(FastqError::UnequalLengths {
            seq_len: seq.len(),
            qual_len: qual.len(),
            id,
        }
        .into());
    }

    if let Some((position, byte)) = qual.bytes().enumerate().find(|(_, q)| *q < PHRED_OFFSET) {
        return Err(FastqError::InvalidQuality { id, position, byte }.into());
    }

    Ok(ReadEntry { id, seq, qual })
}

/// Reads every record of a FASTQ stream into memory, in file order.
pub fn read_fastq_from<R: Read + Send>(reader: R) -> Result<Vec<ReadEntry>> {
    let mut fastq_reader = FastqReader::new(reader);
    let mut reads = Vec::new();

    while let Some(rec) = fastq_reader.next() {
        let rec = rec.with_context(|| format!("Invalid FASTQ record after {} reads", reads.len()))?;
        reads.push(read_entry(&rec)?);

        if reads.len() % 50000 == 0 {
            info!("Processed: {}", reads.len())
        }
    }

    Ok(reads)
}

pub fn read_fastq(path: &Path) -> Result<Vec<ReadEntry>> {
    let file = File::open(path).with_context(|| format!("Unable to open file {}", path.display()))?;
    read_fastq_from(BufReader::new(file))
        .with_context(|| format!("Unable to read FASTQ file {}", path.display()))
}

/// Writes reads as four-line FASTQ records: `@id`, sequence, `+`, quality.
pub fn write_fastq<'a>(
    writer: &mut impl Write,
    reads: impl IntoIterator<Item = &'a ReadEntry>,
) -> std::io::Result<()> {
    for read in reads {
        writeln!(writer, "@{}\n{}\n+\n{}", read.id, read.seq, read.qual)?;
    }
    Ok(())
}

/// Filters the reads of `input` and writes the survivors to `output_name` inside the
/// configured output directory.
///
/// # Errors
///
/// This function will return an error if:
/// * The output directory cannot be created.
/// * The output file already exists (see [`super::OutputError`]). This is checked before the
///   input is read.
/// * The input cannot be read or contains a malformed record. The output file is removed.
pub fn filter_fastq(
    input: &Path,
    output_name: &str,
    opts: &FilterOpts,
    output: &OutputOpts,
) -> Result<FilterSummary> {
    let out_path = output.prepare(output_name)?;
    let mut writer = create_output(&out_path)?;

    info!("Reading reads from {}", input.display());
    let reads = match read_fastq(input) {
        Ok(reads) => reads,
        Err(err) => {
            // no output file on failure
            drop(writer);
            if let Err(e) = std::fs::remove_file(&out_path) {
                warn!("Could not remove {}: {}", out_path.display(), e);
            }
            return Err(err);
        }
    };

    debug!(
        "Filtering with GC {}, length {}, quality >= {}",
        opts.gc, opts.len, opts.quality_threshold
    );
    let (kept, summary) = filter_with_summary(&reads, opts);

    write_fastq(&mut writer, &kept)?;
    writer.flush()?;

    info!(
        "Stats: {} reads, {} kept, {} rejected ({} length, {} GC, {} quality, {} empty)",
        summary.total(),
        summary.kept,
        summary.rejected(),
        summary.length,
        summary.gc_content,
        summary.quality,
        summary.empty,
    );
    info!("Wrote {}", out_path.display());

    Ok(summary)
}
