extern crate env_logger;
#[macro_use]
extern crate log;
use std::io::{prelude::*, stdout, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use seqsmith::filter::FilterOpts;
use seqsmith::io::{self as seqio, OutputOpts};
use seqsmith::tools;
use seqsmith::Sequence;

mod cli;

use cli::{Cli, Commands};

/// Prints a single value as is, and several values as a JSON array, one line in total.
fn print_json<T: Serialize>(values: &[T]) -> Result<()> {
    let mut writer = BufWriter::new(stdout());
    match values {
        [single] => serde_json::to_writer(&mut writer, single)?,
        _ => serde_json::to_writer(&mut writer, values)?,
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    debug!("seqsmith v{}", cli::VERSION);

    match cli.command {
        Commands::Seq {
            procedure,
            sequences,
        } => {
            let outcomes = tools::run_procedure(&sequences, procedure)?;
            print_json(&outcomes)?;
        }
        Commands::Protein { sequences } => {
            let weights = sequences
                .iter()
                .map(|raw| -> Result<f64> {
                    let protein = Sequence::protein(raw)?;
                    Ok(protein.molecular_weight()?)
                })
                .collect::<Result<Vec<_>>>()?;
            print_json(&weights)?;
        }
        Commands::Filter {
            input,
            output,
            dir,
            gc,
            len,
            qual,
        } => {
            let opts = FilterOpts::new(gc, len, qual)?;
            let out = OutputOpts { directory: dir };

            seqio::fastq::filter_fastq(&input, &output, &opts, &out)?;
            info!("Completed successfully.")
        }
        Commands::Fasta { input, output } => {
            let output =
                output.unwrap_or_else(|| seqio::default_output_path(&input, "_one_line.fasta"));
            seqio::fasta::fold_fasta(&input, &output)?;
        }
        Commands::Blast { input, output } => {
            let output = output.unwrap_or_else(|| seqio::default_output_path(&input, "_parse.txt"));
            seqio::blast::parse_blast_output(&input, &output)?;
        }
        Commands::Genbank {
            input,
            genes,
            before,
            after,
            output,
        } => {
            let output =
                output.unwrap_or_else(|| seqio::default_output_path(&input, "_selected.fasta"));
            seqio::genbank::select_genes(&input, &genes, before, after, &output)
                .with_context(|| format!("Could not select genes from {}", input.display()))?;
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
