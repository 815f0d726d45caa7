use assert_fs::prelude::*;
use seqsmith::filter::{self, Bounds, FilterOpts, FilterSummary};
use seqsmith::io::fastq;
use seqsmith::io::OutputOpts;

const EXAMPLE_FASTQ: &str = "tests/data/example.fastq";

fn example_opts() -> FilterOpts {
    FilterOpts::new(
        Bounds::new(40.0, 100.0).unwrap(),
        Bounds::new(20, 100).unwrap(),
        30.0,
    )
    .unwrap()
}

#[test]
fn keeps_reads_passing_all_predicates() {
    let reads = fastq::read_fastq(EXAMPLE_FASTQ.as_ref()).unwrap();
    assert_eq!(reads.len(), 5);

    let kept = filter::filter(&reads, &example_opts());
    let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["read1", "read4"]);
}

#[test]
fn default_opts_keep_everything() {
    let reads = fastq::read_fastq(EXAMPLE_FASTQ.as_ref()).unwrap();
    assert_eq!(filter::filter(&reads, &FilterOpts::default()), reads);
}

#[test]
fn writes_filtered_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = OutputOpts {
        directory: temp.path().join("filtered"),
    };

    let summary =
        fastq::filter_fastq(EXAMPLE_FASTQ.as_ref(), "kept.fastq", &example_opts(), &output)
            .unwrap();
    assert_eq!(
        summary,
        FilterSummary {
            kept: 2,
            length: 1,
            gc_content: 1,
            quality: 1,
            empty: 0,
        }
    );

    let written = temp.child("filtered/kept.fastq");
    let reread = fastq::read_fastq(written.path()).unwrap();
    let ids: Vec<&str> = reread.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["read1", "read4"]);
    assert_eq!(reread[1].qual, "?".repeat(24));
}
