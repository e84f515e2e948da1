//! Streaming FASTQ filter: GC content, length and mean quality, AND-combined.
//!
//! Records are read, scored and either written verbatim or dropped, one at a
//! time and in input order. The first malformed record aborts the run and,
//! with [`filter_fastq`], nothing is left at the destination.

use crate::bounds::Interval;
use crate::error::{Error, Result};
use crate::options::{Destination, FilterOptions};
use crate::reader::FastqReader;
use crate::record::FastqRecord;
use crate::writer::{DestinationFile, FastqWriter};

use std::fmt;
use std::io::Write;
use std::path::Path;

/// Normalized thresholds, ready to test records against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordFilter {
    pub gc: Interval,
    pub length: Interval,
    pub min_quality: f64,
}

/// Outcome of testing one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Keep,
    GcOutOfRange(f64),
    LengthOutOfRange(usize),
    LowQuality(f64),
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Keep => write!(f, "kept"),
            Verdict::GcOutOfRange(gc) => write!(f, "GC {gc:.2}% out of range"),
            Verdict::LengthOutOfRange(len) => write!(f, "length {len} out of range"),
            Verdict::LowQuality(q) => write!(f, "mean quality {q:.2} below threshold"),
        }
    }
}

/// Counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub seen: u64,
    pub kept: u64,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            gc: Interval { lo: 0.0, hi: 100.0 },
            length: Interval::UNBOUNDED,
            min_quality: 0.0,
        }
    }
}

impl RecordFilter {
    pub fn evaluate(&self, rec: &FastqRecord) -> Verdict {
        let gc = rec.gc_percent();
        if !self.gc.contains(gc) {
            return Verdict::GcOutOfRange(gc);
        }
        let len = rec.len();
        if !self.length.contains(len as f64) {
            return Verdict::LengthOutOfRange(len);
        }
        let q = rec.mean_quality();
        if q < self.min_quality {
            return Verdict::LowQuality(q);
        }
        Verdict::Keep
    }

    #[inline]
    pub fn passes(&self, rec: &FastqRecord) -> bool {
        self.evaluate(rec) == Verdict::Keep
    }
}

/// Drive `records` through `filter`, writing survivors to `out`.
///
/// Stops at the first error. Write failures surface as [`Error::Write`].
pub fn filter_records<I, W>(
    records: I,
    filter: &RecordFilter,
    out: &mut FastqWriter<W>,
) -> Result<FilterSummary>
where
    I: IntoIterator<Item = Result<FastqRecord>>,
    W: Write,
{
    let mut summary = FilterSummary::default();
    for rec in records {
        let rec = rec?;
        summary.seen += 1;
        match filter.evaluate(&rec) {
            Verdict::Keep => {
                out.write_record(&rec).map_err(Error::Write)?;
                summary.kept += 1;
            }
            verdict => log::debug!("dropping {}: {verdict}", rec.id()),
        }
    }
    Ok(summary)
}

/// Filter the FASTQ file at `source` into `destination`.
///
/// Returns the number of records written. The destination directory is
/// created if needed and an existing file is replaced. On error the
/// destination is not touched.
pub fn filter_fastq<P: AsRef<Path>>(
    source: P,
    destination: &Destination,
    options: &FilterOptions,
) -> Result<u64> {
    let filter = options.compile()?;
    let reader = FastqReader::from_path(source.as_ref())?;
    let out = DestinationFile::create(destination)?;
    let target = out.target().to_path_buf();

    let mut writer = FastqWriter::new(out);
    let summary = filter_records(reader, &filter, &mut writer).map_err(|e| match e {
        Error::Write(src) => Error::unwritable(&target, src),
        e => e,
    })?;
    let out = writer
        .into_inner()
        .map_err(|e| Error::unwritable(&target, e))?;
    out.commit()?;

    log::info!(
        "{}: kept {} of {} records -> {}",
        source.as_ref().display(),
        summary.kept,
        summary.seen,
        target.display()
    );
    Ok(summary.kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, seq: &str, qual: &str) -> FastqRecord {
        FastqRecord::new(id, seq, qual).unwrap()
    }

    #[test]
    fn verdict_order_is_gc_length_quality() {
        let f = FilterOptions::default()
            .gc_bounds((40.0, 60.0))
            .length_bounds(4.0)
            .quality_threshold(30.0)
            .compile()
            .unwrap();
        assert_eq!(f.evaluate(&rec("a", "AAAA", "IIII")), Verdict::GcOutOfRange(0.0));
        assert_eq!(
            f.evaluate(&rec("b", "ACGTAC", "IIIIII")),
            Verdict::LengthOutOfRange(6)
        );
        assert_eq!(f.evaluate(&rec("c", "ACGT", "!!!!")), Verdict::LowQuality(0.0));
        assert_eq!(f.evaluate(&rec("d", "ACGT", "IIII")), Verdict::Keep);
    }

    #[test]
    fn default_filter_keeps_everything() {
        let f = RecordFilter::default();
        assert!(f.passes(&rec("e", "", "")));
        assert!(f.passes(&rec("g", "GGGG", "!!!!")));
    }

    #[test]
    fn filter_records_stops_on_error() {
        let items = vec![
            Ok(rec("a", "ACGT", "IIII")),
            Err(Error::malformed(
                crate::FormatError::UnexpectedEof,
                2,
                Some("b"),
                Default::default(),
            )),
            Ok(rec("c", "ACGT", "IIII")),
        ];
        let mut w = FastqWriter::new(Vec::new());
        let err = filter_records(items, &RecordFilter::default(), &mut w).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { index: 2, .. }));
        assert_eq!(w.written(), 1);
    }
}
