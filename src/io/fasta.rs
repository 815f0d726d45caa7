use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use bio::io::fasta;

use super::create_output;

/// Copies FASTA records from `reader` to `writer`, joining each multi-line sequence onto a
/// single line. Returns the number of records written.
///
/// Headers are split into identifier and description and written back joined by a single
/// space, so tabs or runs of spaces after the identifier are normalised.
pub fn fold_records<R: Read, W: Write>(reader: R, writer: W) -> Result<usize> {
    let reader = fasta::Reader::new(reader);
    let mut writer = fasta::Writer::new(writer);
    let mut count = 0;

    for record in reader.records() {
        let record = record.with_context(|| format!("Invalid FASTA record after {count} records"))?;
        writer.write_record(&record)?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

/// Rewrites a multi-line FASTA file so that every sequence sits on one line.
pub fn fold_fasta(input: &Path, output: &Path) -> Result<usize> {
    let file = File::open(input).with_context(|| format!("Unable to open file {}", input.display()))?;
    let writer = create_output(output)?;

    let count = fold_records(BufReader::new(file), writer)?;
    info!("Wrote {count} records to {}", output.display());
    Ok(count)
}
