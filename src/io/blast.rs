use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::create_output;

/// Collects the best hit of every query from BLAST text output.
///
/// Each query's hit table starts with a header line beginning with `Description`; the line
/// after it is the top hit, whose description runs up to the first double space. The
/// descriptions are returned sorted.
pub fn top_hit_descriptions(reader: impl BufRead) -> Result<Vec<String>> {
    let mut descriptions = Vec::new();
    let mut lines = reader.lines();

    while let Some(line) = lines.next() {
        if !line?.trim().starts_with("Description") {
            continue;
        }

        let Some(hit) = lines.next() else {
            warn!("Hit table header at end of input has no hits");
            break;
        };
        let hit = hit?;
        let description = hit.trim().split("  ").next().unwrap_or_default().trim();
        descriptions.push(description.to_string());
    }

    descriptions.sort();
    Ok(descriptions)
}

/// Writes the sorted top-hit descriptions of a BLAST output file, one per line.
pub fn parse_blast_output(input: &Path, output: &Path) -> Result<usize> {
    let file = File::open(input).with_context(|| format!("Unable to open file {}", input.display()))?;
    let descriptions = top_hit_descriptions(BufReader::new(file))?;

    let mut writer = create_output(output)?;
    for description in descriptions.iter() {
        writeln!(writer, "{description}")?;
    }
    writer.flush()?;

    info!(
        "Wrote {} descriptions to {}",
        descriptions.len(),
        output.display()
    );
    Ok(descriptions.len())
}
