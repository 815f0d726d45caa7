use std::path::PathBuf;

use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};

use seqsmith::filter::Bounds;
use seqsmith::tools::Procedure;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 seqsmith version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   tools for DNA, RNA and protein sequences and FASTQ filtering";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a procedure to one or more DNA or RNA sequences, printing JSON
    #[command(arg_required_else_help = true)]
    Seq {
        /// the procedure to run
        #[arg(value_enum)]
        procedure: Procedure,

        /// the sequences. T and U may not appear in the same sequence
        #[arg(required = true)]
        sequences: Vec<String>,
    },

    /// Compute the molecular weight (Da) of one or more protein sequences
    #[command(arg_required_else_help = true)]
    Protein {
        /// one-letter amino acid sequences
        #[arg(required = true)]
        sequences: Vec<String>,
    },

    /// Filter a .fastq file by length, GC content and mean quality
    #[command(arg_required_else_help = true)]
    Filter {
        /// the input .fastq file
        input: PathBuf,

        /// name of the output .fastq, created inside the output directory
        #[arg(short)]
        output: String,

        /// the output directory, created if missing
        #[arg(long, default_value = "filtered")]
        dir: PathBuf,

        /// filter GC content (percent) to the interval [a,b], both inclusive.
        /// a single value b is read as [0,b].
        #[arg(
            long,
            value_parser = |x: &str| x.parse::<Bounds<f64>>(),
            default_value = "0,100",
            verbatim_doc_comment
        )]
        gc: Bounds<f64>,

        /// filter read length to the interval [a,b], both inclusive.
        /// b can be `inf`; a single value b is read as [0,b].
        #[arg(
            long,
            value_parser = |x: &str| x.parse::<Bounds<u64>>(),
            default_value = "0,4294967296",
            verbatim_doc_comment
        )]
        len: Bounds<u64>,

        /// minimum mean Phred+33 quality of a read
        #[arg(long, default_value_t = 0.0)]
        qual: f64,
    },

    /// Join multi-line FASTA sequences onto single lines
    #[command(arg_required_else_help = true)]
    Fasta {
        /// the input .fasta file
        input: PathBuf,

        /// the output .fasta [default: <input>_one_line.fasta]
        #[arg(short)]
        output: Option<PathBuf>,
    },

    /// List the top hit description of every query in a BLAST text report, sorted
    #[command(arg_required_else_help = true)]
    Blast {
        /// the BLAST output file
        input: PathBuf,

        /// the output text file [default: <input>_parse.txt]
        #[arg(short)]
        output: Option<PathBuf>,
    },

    /// Export the translations of selected genes and their neighbours from a GenBank file
    #[command(arg_required_else_help = true)]
    Genbank {
        /// the input .gbk file
        input: PathBuf,

        /// names of the genes to select, comma separated
        #[arg(long, required = true, value_delimiter = ',')]
        genes: Vec<String>,

        /// number of genes to include before each selected gene
        #[arg(long, default_value_t = 1)]
        before: usize,

        /// number of genes to include after each selected gene
        #[arg(long, default_value_t = 1)]
        after: usize,

        /// the output .fasta [default: <input>_selected.fasta]
        #[arg(short)]
        output: Option<PathBuf>,
    },
}
