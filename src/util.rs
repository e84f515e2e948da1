use crate::error::{Error, Result};

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

pub(crate) const BUF_CAPACITY: usize = 256 * 1024;

pub fn looks_like_gzip<R: Read + Seek>(mut r: R) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    let pos = r.stream_position()?;
    let n = r.read(&mut magic)?;
    r.seek(SeekFrom::Start(pos))?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}

pub(crate) fn has_gz_extension(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

/// Open `path` for buffered reading, transparently decompressing gzip.
pub(crate) fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let unreadable = |source: io::Error| {
        log::error!("input file not found or unreadable: {}", path.display());
        Error::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        }
    };

    let f = File::open(path).map_err(unreadable)?;
    let is_gz = has_gz_extension(path) || looks_like_gzip(&f).unwrap_or(false);

    if is_gz {
        #[cfg(feature = "gzip")]
        {
            let dec = flate2::read::MultiGzDecoder::new(f);
            Ok(Box::new(BufReader::with_capacity(BUF_CAPACITY, dec)))
        }
        #[cfg(not(feature = "gzip"))]
        {
            Err(unreadable(io::Error::new(
                io::ErrorKind::Unsupported,
                "gzip input requires the `gzip` feature",
            )))
        }
    } else {
        Ok(Box::new(BufReader::with_capacity(BUF_CAPACITY, f)))
    }
}
