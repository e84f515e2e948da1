use crate::error::{Error, Result};
use crate::options::Destination;
use crate::record::FastqRecord;
use crate::util::BUF_CAPACITY;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes records in whole-record units: each record is serialized into a
/// scratch buffer and handed to the sink with a single `write_all`.
pub struct FastqWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
    written: u64,
}

impl<W: Write> FastqWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(1024),
            written: 0,
        }
    }

    pub fn write_record(&mut self, rec: &FastqRecord) -> io::Result<()> {
        self.buf.clear();
        rec.write_into(&mut self.buf);
        self.inner.write_all(&self.buf)?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

enum Sink {
    Plain(BufWriter<NamedTempFile>),
    #[cfg(feature = "gzip")]
    Gzip(flate2::write::GzEncoder<BufWriter<NamedTempFile>>),
}

/// Output file that only appears at its final path once committed.
///
/// Data goes to a temporary file next to the target; `commit` renames it
/// over the target (replacing any previous content). Dropping without
/// committing deletes the temporary file, leaving the target untouched.
pub struct DestinationFile {
    sink: Sink,
    target: PathBuf,
}

impl DestinationFile {
    /// Create the destination directory and a temporary file inside it.
    /// Names ending in `.gz` are gzip-compressed.
    pub fn create(dest: &Destination) -> Result<Self> {
        let target = dest.path();
        let dir = dest.output_dir();
        fs::create_dir_all(&dir).map_err(|e| Error::unwritable(&dir, e))?;
        let tmp = NamedTempFile::new_in(&dir).map_err(|e| Error::unwritable(&target, e))?;
        let buffered = BufWriter::with_capacity(BUF_CAPACITY, tmp);

        let sink = if dest.is_gzip() {
            #[cfg(feature = "gzip")]
            {
                Sink::Gzip(flate2::write::GzEncoder::new(
                    buffered,
                    flate2::Compression::default(),
                ))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(Error::unwritable(
                    &target,
                    io::Error::new(
                        io::ErrorKind::Unsupported,
                        "gzip output requires the `gzip` feature",
                    ),
                ));
            }
        } else {
            Sink::Plain(buffered)
        };

        log::debug!("writing to temporary file for {}", target.display());
        Ok(Self { sink, target })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Flush everything and move the file into place.
    pub fn commit(self) -> Result<PathBuf> {
        let target = self.target;
        let unwritable = |e: io::Error| Error::unwritable(&target, e);

        let buffered = match self.sink {
            Sink::Plain(w) => w,
            #[cfg(feature = "gzip")]
            Sink::Gzip(enc) => enc.finish().map_err(unwritable)?,
        };
        let tmp = buffered
            .into_inner()
            .map_err(|e| unwritable(e.into_error()))?;
        tmp.as_file().sync_all().map_err(unwritable)?;
        tmp.persist(&target).map_err(|e| unwritable(e.error))?;
        Ok(target)
    }
}

impl Write for DestinationFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.sink {
            Sink::Plain(w) => w.write(buf),
            #[cfg(feature = "gzip")]
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match &mut self.sink {
            Sink::Plain(w) => w.write_all(buf),
            #[cfg(feature = "gzip")]
            Sink::Gzip(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::Plain(w) => w.flush(),
            #[cfg(feature = "gzip")]
            Sink::Gzip(w) => w.flush(),
        }
    }
}
