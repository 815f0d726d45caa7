use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use bio::io::fasta;
use itertools::Itertools;
use thiserror::Error;

use super::create_output;

#[derive(Error, Debug)]
pub enum GenbankError {
    #[error("translation of gene `{gene}` is not terminated by a closing quote")]
    UnterminatedTranslation { gene: String },
}

/// A gene name paired with the protein translation of its CDS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gene {
    pub name: String,
    pub translation: String,
}

fn qualifier_value(line: &str) -> &str {
    line.rsplit('=').next().unwrap_or_default().trim().trim_matches('"')
}

/// Extracts `(gene, translation)` pairs from the feature table of a GenBank record.
///
/// A gene is kept once a `/translation=` qualifier follows its `/gene=` qualifier; genes
/// without a translation (pseudogenes, RNA genes) are skipped. Translations spanning several
/// lines are joined.
pub fn parse_genes(reader: impl BufRead) -> Result<Vec<Gene>> {
    let mut genes = Vec::new();
    let mut gene: Option<String> = None;
    let mut translation: Option<String> = None;
    let mut expecting_translation = false;

    let mut lines = reader.lines();
    while let Some(line) = lines.next() {
        let line = line?;
        let line = line.trim();

        if line.starts_with("/gene=") {
            if let (Some(name), Some(translation)) = (gene.take(), translation.take()) {
                genes.push(Gene { name, translation });
            }
            gene = Some(qualifier_value(line).to_string());
            expecting_translation = true;
        } else if line.starts_with("/translation=") && expecting_translation {
            let mut value = qualifier_value(line).to_string();

            let mut current = line.to_string();
            while !current.ends_with('"') {
                let Some(next) = lines.next() else {
                    return Err(GenbankError::UnterminatedTranslation {
                        gene: gene.clone().unwrap_or_default(),
                    }
                    .into());
                };
                current = next?.trim().to_string();
                value.push_str(current.trim_matches('"'));
            }

            translation = Some(value);
            expecting_translation = false;
        }
    }

    if let (Some(name), Some(translation)) = (gene, translation) {
        genes.push(Gene { name, translation });
    }

    Ok(genes)
}

/// For every gene named in `wanted`, picks it together with up to `n_before` genes before and
/// `n_after` genes after it, in file order. Overlapping neighbourhoods yield repeated genes.
pub fn select_neighbourhoods<'a>(
    genes: &'a [Gene],
    wanted: &[String],
    n_before: usize,
    n_after: usize,
) -> Vec<&'a Gene> {
    genes
        .iter()
        .positions(|gene| wanted.contains(&gene.name))
        .flat_map(move |index| {
            let start = index.saturating_sub(n_before);
            let end = index.saturating_add(n_after).saturating_add(1).min(genes.len());
            &genes[start..end]
        })
        .collect()
}

/// Writes the selected genes and their neighbours from a GenBank file as protein FASTA.
pub fn select_genes(
    input: &Path,
    wanted: &[String],
    n_before: usize,
    n_after: usize,
    output: &Path,
) -> Result<usize> {
    let file = File::open(input).with_context(|| format!("Unable to open file {}", input.display()))?;
    let genes = parse_genes(BufReader::new(file))
        .with_context(|| format!("Unable to parse GenBank file {}", input.display()))?;
    debug!("Found {} translated genes", genes.len());

    for name in wanted {
        if !genes.iter().any(|g| &g.name == name) {
            warn!("Gene {name} not found in {}", input.display());
        }
    }

    let selected = select_neighbourhoods(&genes, wanted, n_before, n_after);

    let mut writer = fasta::Writer::new(create_output(output)?);
    for gene in selected.iter() {
        writer.write(&gene.name, None, gene.translation.as_bytes())?;
    }
    writer.flush()?;

    info!("Wrote {} genes to {}", selected.len(), output.display());
    Ok(selected.len())
}
