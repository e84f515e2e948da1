use crate::error::{Error, FormatError, IoContext, Result};
use crate::record::{FastqRecord, parse_header, parse_plus};
use crate::util::open_input;

use std::io::{self, BufRead};
use std::path::Path;

/// Sync FASTQ reader (plain/.gz), streaming one 4-line record at a time.
///
/// The first malformed record ends the stream with an error; nothing after
/// it is read.
pub struct FastqReader {
    rdr: Box<dyn BufRead + Send>,
    line_num: u64,
    byte_pos: u64,
    records: u64,
    failed: bool,
}

impl FastqReader {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let rdr = open_input(path)?;
        Ok(Self::with_reader(rdr))
    }

    /// Wrap an arbitrary `BufRead` (stdin, in-memory buffers, etc.).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self::with_reader(Box::new(reader))
    }

    fn with_reader(rdr: Box<dyn BufRead + Send>) -> Self {
        Self {
            rdr,
            line_num: 0,
            byte_pos: 0,
            records: 0,
            failed: false,
        }
    }

    /// Number of records started so far, including a failing one.
    pub fn records_read(&self) -> u64 {
        self.records
    }

    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        buf.clear();
        let n = self.rdr.read_line(buf)?;
        if n > 0 {
            self.line_num += 1;
            self.byte_pos += n as u64;
            if buf.ends_with('\n') {
                buf.pop();
            }
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(n)
    }

    /// Read a required line of the current record; EOF here is a truncated record.
    fn read_body_line(&mut self, buf: &mut String, id: &str) -> Result<()> {
        let n = self
            .read_line(buf)
            .map_err(|e| Error::io_err(e, self.ctx()))?;
        if n == 0 {
            return Err(self.malformed(FormatError::UnexpectedEof, Some(id)));
        }
        Ok(())
    }

    fn read_one(&mut self) -> Result<Option<FastqRecord>> {
        // seek first non-empty line
        let mut line = String::with_capacity(128);
        loop {
            let n = self
                .read_line(&mut line)
                .map_err(|e| Error::io_err(e, self.ctx()))?;
            if n == 0 {
                return Ok(None);
            }
            if !line.is_empty() {
                break;
            }
        }
        self.records += 1;

        let header = parse_header(&line)
            .map_err(|e| self.malformed(e, None))?
            .to_string();
        let id = header.split(char::is_whitespace).next().unwrap_or("");

        self.read_body_line(&mut line, id)?;
        let seq = line.as_bytes().to_vec();

        self.read_body_line(&mut line, id)?;
        let plus = parse_plus(&line)
            .map_err(|e| self.malformed(e, Some(id)))?
            .to_string();

        // an empty sequence may end the file without its (empty) quality line
        let n = self
            .read_line(&mut line)
            .map_err(|e| Error::io_err(e, self.ctx()))?;
        if n == 0 && !seq.is_empty() {
            return Err(self.malformed(FormatError::UnexpectedEof, Some(id)));
        }
        let qual = line.as_bytes().to_vec();

        if qual.len() != seq.len() {
            return Err(self.malformed(
                FormatError::LengthMismatch {
                    seq: seq.len(),
                    qual: qual.len(),
                },
                Some(id),
            ));
        }

        Ok(Some(FastqRecord {
            header,
            seq,
            plus,
            qual,
        }))
    }

    fn malformed(&self, source: FormatError, id: Option<&str>) -> Error {
        Error::malformed(source, self.records, id, self.ctx())
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
        }
    }
}

impl Iterator for FastqReader {
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_one() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
