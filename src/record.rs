use crate::error::FormatError;
use crate::stats;

/// One FASTQ read. Header and separator text are kept verbatim so the
/// record can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    /// Header line without the leading '@'.
    pub header: String,
    pub seq: Vec<u8>,
    /// Separator line without the leading '+'; usually empty.
    pub plus: String,
    pub qual: Vec<u8>,
}

impl FastqRecord {
    /// Build a record, enforcing the sequence/quality length invariant.
    pub fn new(
        header: impl Into<String>,
        seq: impl Into<Vec<u8>>,
        qual: impl Into<Vec<u8>>,
    ) -> Result<Self, FormatError> {
        let (seq, qual) = (seq.into(), qual.into());
        if seq.len() != qual.len() {
            return Err(FormatError::LengthMismatch {
                seq: seq.len(),
                qual: qual.len(),
            });
        }
        Ok(Self {
            header: header.into(),
            seq,
            plus: String::new(),
            qual,
        })
    }

    /// Identifier: header text up to the first whitespace.
    pub fn id(&self) -> &str {
        self.header
            .split(char::is_whitespace)
            .next()
            .unwrap_or("")
    }

    /// Free text after the identifier, if any.
    pub fn desc(&self) -> Option<&str> {
        self.header
            .split_once(char::is_whitespace)
            .map(|(_, d)| d.trim())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn gc_percent(&self) -> f64 {
        stats::gc_percent(&self.seq)
    }

    pub fn mean_quality(&self) -> f64 {
        stats::mean_quality(&self.qual)
    }

    /// Append the 4-line text form to `buf`.
    pub fn write_into(&self, buf: &mut Vec<u8>) {
        buf.reserve(self.header.len() + self.plus.len() + 2 * self.seq.len() + 6);
        buf.push(b'@');
        buf.extend_from_slice(self.header.as_bytes());
        buf.push(b'\n');
        buf.extend_from_slice(&self.seq);
        buf.extend_from_slice(b"\n+");
        buf.extend_from_slice(self.plus.as_bytes());
        buf.push(b'\n');
        buf.extend_from_slice(&self.qual);
        buf.push(b'\n');
    }
}

/// Strip the '@' from a header line, recognising stray FASTA headers.
pub(crate) fn parse_header(line: &str) -> Result<&str, FormatError> {
    match line.as_bytes().first() {
        Some(b'@') => Ok(&line[1..]),
        Some(b'>') => Err(FormatError::FastaHeaderDetected),
        _ => Err(FormatError::MissingHeader),
    }
}

pub(crate) fn parse_plus(line: &str) -> Result<&str, FormatError> {
    line.strip_prefix('+').ok_or(FormatError::MissingPlus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_and_desc_split_on_whitespace() {
        let rec = FastqRecord::new("read1 lane=2 x", "ACGT", "IIII").unwrap();
        assert_eq!(rec.id(), "read1");
        assert_eq!(rec.desc(), Some("lane=2 x"));

        let rec = FastqRecord::new("read2", "A", "I").unwrap();
        assert_eq!(rec.id(), "read2");
        assert_eq!(rec.desc(), None);
    }

    #[test]
    fn new_rejects_length_mismatch() {
        assert_eq!(
            FastqRecord::new("r", "ACGTACGTAC", "IIIIIIII"),
            Err(FormatError::LengthMismatch { seq: 10, qual: 8 })
        );
    }

    #[test]
    fn writes_four_lines_verbatim() {
        let mut rec = FastqRecord::new("r1 desc", "ACGT", "!!II").unwrap();
        rec.plus = "r1 desc".to_string();
        let mut buf = Vec::new();
        rec.write_into(&mut buf);
        assert_eq!(buf, b"@r1 desc\nACGT\n+r1 desc\n!!II\n");
    }

    #[test]
    fn header_kinds() {
        assert_eq!(parse_header("@x y"), Ok("x y"));
        assert_eq!(parse_header(">x"), Err(FormatError::FastaHeaderDetected));
        assert_eq!(parse_header("x"), Err(FormatError::MissingHeader));
        assert_eq!(parse_plus("+"), Ok(""));
        assert_eq!(parse_plus("ACGT"), Err(FormatError::MissingPlus));
    }
}
