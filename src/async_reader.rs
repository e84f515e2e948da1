#![cfg(feature = "async")]

use crate::error::{Error, FormatError, IoContext, Result};
use crate::record::{FastqRecord, parse_header, parse_plus};
use crate::util::{BUF_CAPACITY, has_gz_extension};

use async_compression::tokio::bufread::GzipDecoder;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

/// Async FASTQ reader (plain/.gz), streaming.
pub struct AsyncFastqReader {
    rdr: Box<dyn AsyncBufRead + Unpin + Send>,
    line_num: u64,
    byte_pos: u64,
    records: u64,
    failed: bool,
}

impl AsyncFastqReader {
    /// Open async from path; `.gz` auto-detect by extension or magic bytes.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let unreadable = |source: io::Error| {
            log::error!("input file not found or unreadable: {}", path.display());
            Error::SourceUnreadable {
                path: path.clone(),
                source,
            }
        };

        let mut f = File::open(&path).await.map_err(unreadable)?;
        let is_gz =
            has_gz_extension(&path) || looks_like_gzip_async(&mut f).await.unwrap_or(false);

        let rdr: Box<dyn AsyncBufRead + Unpin + Send> = if is_gz {
            let mut gz = GzipDecoder::new(BufReader::with_capacity(BUF_CAPACITY, f));
            gz.multiple_members(true);
            Box::new(BufReader::with_capacity(BUF_CAPACITY, gz))
        } else {
            Box::new(BufReader::with_capacity(BUF_CAPACITY, f))
        };

        Ok(Self::with_reader(rdr))
    }

    /// Wrap any async `AsyncBufRead`.
    pub fn from_async_bufread<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        Self::with_reader(Box::new(reader))
    }

    fn with_reader(rdr: Box<dyn AsyncBufRead + Unpin + Send>) -> Self {
        Self {
            rdr,
            line_num: 0,
            byte_pos: 0,
            records: 0,
            failed: false,
        }
    }

    /// Fetch next record (async). Yields `None` after the first error.
    pub async fn next_record(&mut self) -> Option<Result<FastqRecord>> {
        if self.failed {
            return None;
        }
        match self.read_one().await {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    async fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        buf.clear();
        let n = self.rdr.read_line(buf).await?;
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

    async fn read_body_line(&mut self, buf: &mut String, id: &str) -> Result<()> {
        let n = self
            .read_line(buf)
            .await
            .map_err(|e| Error::io_err(e, self.ctx()))?;
        if n == 0 {
            return Err(self.malformed(FormatError::UnexpectedEof, Some(id)));
        }
        Ok(())
    }

    async fn read_one(&mut self) -> Result<Option<FastqRecord>> {
        let mut line = String::with_capacity(128);
        loop {
            let n = self
                .read_line(&mut line)
                .await
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
        let id = header
            .split(char::is_whitespace)
            .next()
            .unwrap_or("")
            .to_string();

        self.read_body_line(&mut line, &id).await?;
        let seq = line.as_bytes().to_vec();

        self.read_body_line(&mut line, &id).await?;
        let plus = parse_plus(&line)
            .map_err(|e| self.malformed(e, Some(&id)))?
            .to_string();

        let n = self
            .read_line(&mut line)
            .await
            .map_err(|e| Error::io_err(e, self.ctx()))?;
        if n == 0 && !seq.is_empty() {
            return Err(self.malformed(FormatError::UnexpectedEof, Some(&id)));
        }
        let qual = line.as_bytes().to_vec();

        if qual.len() != seq.len() {
            return Err(self.malformed(
                FormatError::LengthMismatch {
                    seq: seq.len(),
                    qual: qual.len(),
                },
                Some(&id),
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

async fn looks_like_gzip_async(f: &mut File) -> io::Result<bool> {
    let pos = f.stream_position().await?;
    let mut magic = [0u8; 2];
    let n = f.read(&mut magic).await?;
    f.seek(SeekFrom::Start(pos)).await?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}
