use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use indoc::formatdoc;

use crate::error::{Result, SeqError};
use crate::seq::dna;

/// Offset of the Phred+33 (Sanger/Illumina 1.8+) quality encoding.
pub const PHRED_OFFSET: u8 = 33;

/// A numeric type that can serve as the endpoint of a [`Bounds`].
pub trait BoundValue: Copy + PartialOrd + Default + fmt::Display + FromStr {
    /// Stand-in for an unbounded maximum, written `inf` on the command line.
    const UNBOUNDED: Self;
}

impl BoundValue for f64 {
    const UNBOUNDED: Self = f64::INFINITY;
}

impl BoundValue for u64 {
    const UNBOUNDED: Self = u64::MAX;
}

/// A closed interval `[lower, upper]`. Both ends are inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds<T> {
    lower: T,
    upper: T,
}

impl<T: BoundValue> Bounds<T> {
    /// # Errors
    ///
    /// [`SeqError::MalformedBounds`] if `lower` is negative, if `lower > upper`, or if either
    /// end is NaN.
    pub fn new(lower: T, upper: T) -> Result<Self> {
        if lower < T::default() {
            return Err(SeqError::MalformedBounds {
                reason: format!("lower bound {lower} is negative"),
            });
        }
        // written this way round so that NaN on either side is rejected
        if !(lower <= upper) {
            return Err(SeqError::MalformedBounds {
                reason: format!("lower bound {lower} is greater than upper bound {upper}"),
            });
        }

        Ok(Self { lower, upper })
    }

    /// The interval `[0, upper]`, which is what a single scalar bound stands for.
    pub fn up_to(upper: T) -> Result<Self> {
        Self::new(T::default(), upper)
    }

    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
    }

    pub fn contains(&self, v: T) -> bool {
        (self.lower <= v) && (v <= self.upper)
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

fn parse_bound<T: BoundValue>(s: &str, which: &str) -> Result<T> {
    match s {
        "inf" => Ok(T::UNBOUNDED),
        s => s.parse::<T>().map_err(|_| SeqError::MalformedBounds {
            reason: format!("invalid {which} value: '{s}' (should be a non-negative number or `inf`)"),
        }),
    }
}

/// Parses `a,b` into `[a, b]` and a single `b` into `[0, b]`. `inf` may be given for the
/// maximum.
impl<T: BoundValue> FromStr for Bounds<T> {
    type Err = SeqError;

    fn from_str(arg: &str) -> Result<Self> {
        let arg_lc = arg.trim().to_lowercase();
        let parts: Vec<&str> = arg_lc.split(',').map(str::trim).collect();

        match parts.as_slice() {
            [upper] => Self::up_to(parse_bound(upper, "maximum")?),
            [lower, upper] => Self::new(
                parse_bound(lower, "minimum")?,
                parse_bound(upper, "maximum")?,
            ),
            _ => Err(SeqError::MalformedBounds {
                reason: formatdoc! {"
                expected '<min>,<max>' or '<max>', got '{arg}'. For example:
                  --gc 40,60
                  --len 0,inf
                  --len 150
                "},
            }),
        }
    }
}

/// A single sequencing read as handed over by a FASTQ reader. `seq` and `qual` must have the
/// same length; the reader is responsible for checking that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadEntry {
    pub id: String,
    pub seq: String,
    pub qual: String,
}

impl ReadEntry {
    pub fn new(id: impl Into<String>, seq: impl Into<String>, qual: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            seq: seq.into(),
            qual: qual.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// GC percentage; `N` and other non-ACGT symbols only count toward the length.
    pub fn gc_content(&self) -> Option<f64> {
        dna::gc_percent(self.seq.as_bytes())
    }

    /// Sum of the decoded Phred+33 scores. Bytes below `!` score 0; the FASTQ reader rejects
    /// them before a `ReadEntry` is built.
    pub fn phred_quality_total(&self) -> u64 {
        self.qual
            .bytes()
            .map(|q| q.saturating_sub(PHRED_OFFSET) as u64)
            .sum()
    }

    /// Arithmetic mean of the decoded Phred+33 scores, `None` if there are none.
    pub fn phred_quality_avg(&self) -> Option<f64> {
        match self.qual.len() {
            0 => None,
            n => Some(self.phred_quality_total() as f64 / n as f64),
        }
    }
}

/// Acceptance criteria for reads. The defaults accept every read, empty ones included.
///
/// An empty read has no GC content and no mean quality. It is rejected as
/// [`Rejection::Empty`] only while a GC interval narrower than `[0, 100]` or a positive quality
/// threshold is set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FilterOpts {
    /// GC content, in percent.
    pub gc: Bounds<f64>,
    /// Number of bases.
    pub len: Bounds<u64>,
    /// Minimum mean Phred quality.
    pub quality_threshold: f64,
}

impl FilterOpts {
    pub fn new(gc: Bounds<f64>, len: Bounds<u64>, quality_threshold: f64) -> Result<Self> {
        if quality_threshold.is_nan() {
            return Err(SeqError::MalformedBounds {
                reason: "quality threshold is NaN".to_string(),
            });
        }

        Ok(Self {
            gc,
            len,
            quality_threshold,
        })
    }

    /// Whether the GC or quality predicate can reject anything.
    fn needs_ratios(&self) -> bool {
        self.gc.lower() > 0.0 || self.gc.upper() < 100.0 || self.quality_threshold > 0.0
    }
}

impl Default for FilterOpts {
    fn default() -> Self {
        Self {
            gc: Bounds {
                lower: 0.0,
                upper: 100.0,
            },
            len: Bounds {
                lower: 0,
                upper: 1 << 32,
            },
            quality_threshold: 0.0,
        }
    }
}

/// The first criterion a read failed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rejection {
    /// No bases, so neither GC content nor mean quality is defined.
    Empty,
    Length,
    GcContent,
    Quality,
}

/// Evaluates the three predicates in a fixed order (length, GC, quality) and reports the
/// first one that fails.
pub fn check(read: &ReadEntry, opts: &FilterOpts) -> std::result::Result<(), Rejection> {
    if !opts.len.contains(read.len() as u64) {
        return Err(Rejection::Length);
    }

    let (Some(gc), Some(quality)) = (read.gc_content(), read.phred_quality_avg()) else {
        return if opts.needs_ratios() {
            Err(Rejection::Empty)
        } else {
            Ok(())
        };
    };

    if !opts.gc.contains(gc) {
        return Err(Rejection::GcContent);
    }
    if quality < opts.quality_threshold {
        return Err(Rejection::Quality);
    }
    Ok(())
}

pub fn passes(read: &ReadEntry, opts: &FilterOpts) -> bool {
    check(read, opts).is_ok()
}

/// Counts of kept reads and of rejected reads by reason.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterSummary {
    pub kept: usize,
    pub empty: usize,
    pub length: usize,
    pub gc_content: usize,
    pub quality: usize,
}

impl FilterSummary {
    fn record(&mut self, verdict: std::result::Result<(), Rejection>) {
        match verdict {
            Ok(()) => self.kept += 1,
            Err(Rejection::Empty) => self.empty += 1,
            Err(Rejection::Length) => self.length += 1,
            Err(Rejection::GcContent) => self.gc_content += 1,
            Err(Rejection::Quality) => self.quality += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.empty + self.length + self.gc_content + self.quality
    }

    pub fn total(&self) -> usize {
        self.kept + self.rejected()
    }
}

/// Returns the reads passing `opts`, in input order, along with a summary of why the others
/// were dropped.
pub fn filter_with_summary(
    reads: &[ReadEntry],
    opts: &FilterOpts,
) -> (Vec<ReadEntry>, FilterSummary) {
    let mut summary = FilterSummary::default();

    let kept = reads
        .iter()
        .filter(|read| {
            let verdict = check(read, opts);
            summary.record(verdict);
            verdict.is_ok()
        })
        .cloned()
        .collect();

    (kept, summary)
}

pub fn filter(reads: &[ReadEntry], opts: &FilterOpts) -> Vec<ReadEntry> {
    filter_with_summary(reads, opts).0
}

/// Same as [`filter`] for reads keyed by identifier; key order is kept.
pub fn filter_keyed(
    reads: &IndexMap<String, ReadEntry>,
    opts: &FilterOpts,
) -> IndexMap<String, ReadEntry> {
    reads
        .iter()
        .filter(|(_, read)| passes(read, opts))
        .map(|(id, read)| (id.clone(), read.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(id: &str, seq: &str, q: char) -> ReadEntry {
        ReadEntry::new(id, seq, q.to_string().repeat(seq.len()))
    }

    #[test]
    fn parse_pair() {
        let b: Bounds<f64> = "40,60".parse().unwrap();
        assert_eq!((b.lower(), b.upper()), (40.0, 60.0));

        let b: Bounds<u64> = " 10 , 20 ".parse().unwrap();
        assert_eq!((b.lower(), b.upper()), (10, 20));
    }

    #[test]
    fn scalar_means_upper_bound() {
        let scalar: Bounds<f64> = "50".parse().unwrap();
        assert_eq!(scalar, Bounds::new(0.0, 50.0).unwrap());
        assert_eq!(scalar, Bounds::up_to(50.0).unwrap());
    }

    #[test]
    fn parse_unbounded() {
        let b: Bounds<f64> = "0,inf".parse().unwrap();
        assert!(b.contains(1e12));
        let b: Bounds<u64> = "5,INF".parse().unwrap();
        assert_eq!(b.upper(), u64::MAX);
    }

    #[test]
    fn malformed_bounds() {
        assert!(Bounds::new(60.0, 40.0).is_err());
        assert!(Bounds::new(-1.0, 40.0).is_err());
        assert!(Bounds::new(f64::NAN, 40.0).is_err());
        assert!(Bounds::new(0.0, f64::NAN).is_err());
        for bad in ["low,high", "1,2,3", "", "-5", "short"] {
            assert!(
                matches!(bad.parse::<Bounds<u64>>(), Err(SeqError::MalformedBounds { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let b = Bounds::new(20u64, 100).unwrap();
        assert!(b.contains(20));
        assert!(b.contains(100));
        assert!(!b.contains(19));
        assert!(!b.contains(101));
    }

    #[test]
    fn degenerate_bounds() {
        let b = Bounds::new(0.0, 0.0).unwrap();
        assert!(b.contains(0.0));
        assert!(!b.contains(0.1));
    }

    #[test]
    fn defaults() {
        let opts = FilterOpts::default();
        assert_eq!(opts.gc, Bounds::new(0.0, 100.0).unwrap());
        assert_eq!(opts.len, Bounds::new(0, 4294967296).unwrap());
        assert_eq!(opts.quality_threshold, 0.0);
        assert!(passes(&read("r", "ACGT", '!'), &opts));
    }

    #[test]
    fn quality_decoding() {
        // 'I' is Phred 40, '+' is Phred 10
        let r = ReadEntry::new("r", "ACGT", "II++");
        assert_eq!(r.phred_quality_total(), 100);
        assert_eq!(r.phred_quality_avg(), Some(25.0));
    }

    #[test]
    fn each_predicate_rejects_independently() {
        let opts = FilterOpts::new(
            Bounds::new(40.0, 60.0).unwrap(),
            Bounds::new(4, 8).unwrap(),
            30.0,
        )
        .unwrap();

        assert_eq!(check(&read("ok", "ACGT", 'I'), &opts), Ok(()));
        assert_eq!(check(&read("short", "GC", 'I'), &opts), Err(Rejection::Length));
        assert_eq!(check(&read("at", "ATATAT", 'I'), &opts), Err(Rejection::GcContent));
        assert_eq!(check(&read("lowq", "ACGT", '+'), &opts), Err(Rejection::Quality));
        // length is checked first, and 0 is outside [4, 8]
        assert_eq!(check(&read("empty", "", 'I'), &opts), Err(Rejection::Length));
    }

    #[test]
    fn empty_read_under_defaults() {
        let empty = ReadEntry::new("e", "", "");
        assert_eq!(check(&empty, &FilterOpts::default()), Ok(()));
        assert_eq!(filter(&[empty.clone()], &FilterOpts::default()), vec![empty.clone()]);

        let gc = FilterOpts {
            gc: "40,100".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(check(&empty, &gc), Err(Rejection::Empty));

        let qual = FilterOpts {
            quality_threshold: 1.0,
            ..Default::default()
        };
        assert_eq!(check(&empty, &qual), Err(Rejection::Empty));

        // the length predicate still applies
        let len = FilterOpts {
            len: "1,10".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(check(&empty, &len), Err(Rejection::Length));
    }

    #[test]
    fn threshold_is_inclusive() {
        let opts = FilterOpts::new(Bounds::up_to(100.0).unwrap(), Bounds::up_to(10).unwrap(), 30.0)
            .unwrap();
        // '?' is exactly Phred 30
        assert!(passes(&read("r", "ACGT", '?'), &opts));
        assert!(!passes(&read("r", "ACGT", '>'), &opts));
    }

    #[test]
    fn n_counts_toward_length_only() {
        let opts = FilterOpts::new(
            Bounds::new(50.0, 50.0).unwrap(),
            Bounds::up_to(10).unwrap(),
            0.0,
        )
        .unwrap();
        assert!(passes(&read("r", "GCNN", 'I'), &opts));
        assert!(!passes(&read("r", "GCN", 'I'), &opts));
    }

    #[test]
    fn batch_keeps_input_order() {
        let reads = vec![
            read("a", "GGGG", 'I'),
            read("b", "AAAA", 'I'),
            read("c", "CCCC", 'I'),
            read("d", "GCGC", '#'),
        ];
        let opts = FilterOpts::new(Bounds::new(50.0, 100.0).unwrap(), Bounds::up_to(10).unwrap(), 20.0)
            .unwrap();

        let (kept, summary) = filter_with_summary(&reads, &opts);
        let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(
            summary,
            FilterSummary {
                kept: 2,
                gc_content: 1,
                quality: 1,
                ..Default::default()
            }
        );
        assert_eq!(summary.total(), 4);
        // input is untouched
        assert_eq!(reads.len(), 4);
    }

    #[test]
    fn empty_batch() {
        assert!(filter(&[], &FilterOpts::default()).is_empty());
        assert!(filter_keyed(&IndexMap::new(), &FilterOpts::default()).is_empty());
    }

    #[test]
    fn keyed_batch() {
        let reads: IndexMap<String, ReadEntry> = ["z", "y", "x"]
            .into_iter()
            .zip(["GGGG", "AAAA", "GCGC"])
            .map(|(id, seq)| (id.to_string(), read(id, seq, 'I')))
            .collect();
        let opts = FilterOpts::new(Bounds::new(50.0, 100.0).unwrap(), Bounds::up_to(10).unwrap(), 0.0)
            .unwrap();

        let kept = filter_keyed(&reads, &opts);
        assert_eq!(kept.keys().collect::<Vec<_>>(), ["z", "x"]);
    }
}
