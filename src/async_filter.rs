#![cfg(feature = "async")]

use crate::async_reader::AsyncFastqReader;
use crate::error::{Error, Result};
use crate::filter::{FilterSummary, RecordFilter, Verdict};
use crate::options::{Destination, FilterOptions};
use crate::util::BUF_CAPACITY;

use async_compression::tokio::write::GzipEncoder;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Async counterpart of [`crate::filter::filter_records`]. Records are
/// processed strictly in input order.
pub async fn filter_records_async<W>(
    reader: &mut AsyncFastqReader,
    filter: &RecordFilter,
    out: &mut W,
) -> Result<FilterSummary>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut summary = FilterSummary::default();
    let mut buf = Vec::with_capacity(1024);
    while let Some(rec) = reader.next_record().await {
        let rec = rec?;
        summary.seen += 1;
        match filter.evaluate(&rec) {
            Verdict::Keep => {
                buf.clear();
                rec.write_into(&mut buf);
                out.write_all(&buf).await.map_err(Error::Write)?;
                summary.kept += 1;
            }
            verdict => log::debug!("dropping {}: {verdict}", rec.id()),
        }
    }
    Ok(summary)
}

/// Async counterpart of [`crate::filter::filter_fastq`].
///
/// Output goes to a temporary file that is moved into place only after the
/// whole input was processed. If the future is dropped early the temporary
/// file is removed with it.
pub async fn filter_fastq_async<P: AsRef<Path>>(
    source: P,
    destination: &Destination,
    options: &FilterOptions,
) -> Result<u64> {
    let filter = options.compile()?;
    let mut reader = AsyncFastqReader::from_path(source.as_ref()).await?;

    let target = destination.path();
    let unwritable = |e: std::io::Error| Error::unwritable(&target, e);
    let dir = destination.output_dir();
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| Error::unwritable(&dir, e))?;
    let tmp = NamedTempFile::new_in(&dir).map_err(unwritable)?;
    let file = tokio::fs::File::from_std(tmp.as_file().try_clone().map_err(unwritable)?);
    let buffered = BufWriter::with_capacity(BUF_CAPACITY, file);

    let mut sink: Box<dyn AsyncWrite + Unpin + Send> = if destination.is_gzip() {
        Box::new(GzipEncoder::new(buffered))
    } else {
        Box::new(buffered)
    };

    let summary = filter_records_async(&mut reader, &filter, &mut *sink)
        .await
        .map_err(|e| match e {
            Error::Write(src) => unwritable(src),
            e => e,
        })?;
    sink.shutdown().await.map_err(unwritable)?;
    drop(sink);

    tmp.persist(&target).map_err(|e| unwritable(e.error))?;
    log::info!(
        "{}: kept {} of {} records -> {}",
        source.as_ref().display(),
        summary.kept,
        summary.seen,
        target.display()
    );
    Ok(summary.kept)
}
