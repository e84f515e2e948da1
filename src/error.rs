use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Position in the input stream where a problem was noticed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

impl fmt::Display for IoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} (byte {})", self.line_num, self.byte_pos)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected header '@' at start of record")]
    MissingHeader,
    #[error("found FASTA header '>' where FASTQ '@' expected")]
    FastaHeaderDetected,
    #[error("missing '+' separator line")]
    MissingPlus,
    #[error("unexpected EOF inside record")]
    UnexpectedEof,
    #[error("quality length ({qual}) does not match sequence length ({seq})")]
    LengthMismatch { seq: usize, qual: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum BoundsError {
    #[error("lower bound {lo} is greater than upper bound {hi}")]
    Inverted { lo: f64, hi: f64 },
    #[error("bound {0} is negative")]
    Negative(f64),
    #[error("bound is not a number")]
    NotANumber,
    #[error("lower bound {0} is not finite")]
    InfiniteLower(f64),
    #[error("cannot parse bounds '{0}', expected 'MAX', 'MIN,MAX' or 'MIN..MAX'")]
    Parse(String),
    #[error("quality threshold {0} is not finite")]
    Threshold(f64),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bounds: {0}")]
    InvalidBounds(#[from] BoundsError),

    #[error("malformed record #{index} ({}) at {ctx}: {source}", .id.as_deref().unwrap_or("<no id>"))]
    MalformedRecord {
        /// 1-based position of the record in the input.
        index: u64,
        id: Option<String>,
        ctx: IoContext,
        #[source]
        source: FormatError,
    },

    #[error("invalid character {ch:?} at position {pos}")]
    InvalidAlphabet { ch: char, pos: usize },

    #[error("cannot read input {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write destination {}: {source}", .path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output: {0}")]
    Write(#[source] io::Error),

    #[error("I/O error at {ctx}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
}

impl Error {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }

    pub(crate) fn malformed(
        source: FormatError,
        index: u64,
        id: Option<&str>,
        ctx: IoContext,
    ) -> Self {
        Self::MalformedRecord {
            index,
            id: id.map(str::to_owned),
            ctx,
            source,
        }
    }

    pub(crate) fn unwritable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DestinationUnwritable {
            path: path.into(),
            source,
        }
    }
}
