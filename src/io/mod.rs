//! Adapters between files on disk and the in-memory values the core works on.

pub mod blast;
pub mod fasta;
pub mod fastq;
pub mod genbank;

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("the file '{}' already exists", path.display())]
    AlreadyExists { path: PathBuf },
}

/// Where filtered output files are placed.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputOpts {
    pub directory: PathBuf,
}

impl Default for OutputOpts {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("filtered"),
        }
    }
}

impl OutputOpts {
    /// Creates the output directory if needed and returns the path `name` will be written to.
    pub fn prepare(&self, name: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory).with_context(|| {
            format!("Unable to create directory {}", self.directory.display())
        })?;
        Ok(self.directory.join(name))
    }
}

/// Opens a new file for writing. Existing files are never overwritten.
///
/// # Errors
///
/// Fails with [`OutputError::AlreadyExists`] if something is already at `path`, and with the
/// underlying I/O error for anything else.
pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => anyhow::Error::new(OutputError::AlreadyExists {
                path: path.to_path_buf(),
            }),
            _ => anyhow::Error::new(e)
                .context(format!("Unable to create file {}", path.display())),
        })?;

    Ok(BufWriter::new(file))
}

/// Derives an output path next to `input`, replacing its extension with `suffix`:
/// `data/genes.gbk` with `_selected.fasta` becomes `data/genes_selected.fasta`.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{suffix}"))
}
