//! Small sequence toolkit with a streaming FASTQ filter.
//!
//! - FASTQ filtering by GC content, length and mean Phred+33 quality,
//!   with bounds given as a single maximum or a `(min, max)` pair.
//! - Plain and `.gz` input (auto-detect) and output (by `.gz` name).
//! - Strict parsing: the first malformed record aborts the run and no
//!   output file is left behind.
//! - DNA/RNA reverse, complement, reverse complement, transcription,
//!   codon search, and protein motif search.
//! - Optional async API behind the `async` feature.
//!
//! ```no_run
//! use genes_detective::{Destination, FilterOptions, filter_fastq};
//!
//! let opts = FilterOptions::default()
//!     .gc_bounds((40.0, 60.0))
//!     .length_bounds(150.0)
//!     .quality_threshold(20.0);
//! let kept = filter_fastq("reads.fastq", &Destination::in_default_dir("good.fastq"), &opts)?;
//! println!("{kept} records kept");
//! # Ok::<(), genes_detective::Error>(())
//! ```

pub mod bounds;
pub mod error;
pub mod filter;
pub mod options;
pub mod reader;
pub mod record;
pub mod seq;
pub mod stats;
mod util;
pub mod writer;

#[cfg(feature = "async")]
pub mod async_filter;
#[cfg(feature = "async")]
pub mod async_reader;

pub use crate::bounds::{BoundsSpec, Interval};
pub use crate::error::{BoundsError, Error, FormatError, IoContext, Result};
pub use crate::filter::{FilterSummary, RecordFilter, Verdict, filter_fastq, filter_records};
pub use crate::options::{Destination, FilterOptions};
pub use crate::reader::FastqReader;
pub use crate::record::FastqRecord;
pub use crate::seq::Operation;
pub use crate::writer::{DestinationFile, FastqWriter};

#[cfg(feature = "async")]
pub use crate::async_filter::filter_fastq_async;
#[cfg(feature = "async")]
pub use crate::async_reader::AsyncFastqReader;
