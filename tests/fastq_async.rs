#[cfg(feature = "async")]
mod t {
    use genes_detective::{
        AsyncFastqReader, Destination, Error, FilterOptions, FormatError, filter_fastq_async,
    };
    use tempfile::tempdir;
    use tokio::fs::File;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn async_parse_plain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.fastq");
        {
            let mut f = File::create(&path).await.unwrap();
            f.write_all(b"@id\nACGT\n+\n!!!!\n").await.unwrap();
        }
        let mut fq = AsyncFastqReader::from_path(&path).await.unwrap();

        if let Some(Ok(rec)) = fq.next_record().await {
            assert_eq!(rec.id(), "id");
            assert_eq!(rec.seq, b"ACGT");
            assert_eq!(rec.qual, b"!!!!");
        } else {
            panic!("no record");
        }
        assert!(fq.next_record().await.is_none());
    }

    #[tokio::test]
    async fn async_length_mismatch() {
        let mut fq =
            AsyncFastqReader::from_async_bufread(&b"@bad\nACGTACGTAC\n+\nIIIIIIII\n"[..]);
        match fq.next_record().await {
            Some(Err(Error::MalformedRecord { id, source, .. })) => {
                assert_eq!(id.as_deref(), Some("bad"));
                assert_eq!(source, FormatError::LengthMismatch { seq: 10, qual: 8 });
            }
            _ => panic!("expected malformed record"),
        }
        assert!(fq.next_record().await.is_none());
    }

    #[tokio::test]
    async fn async_trailing_empty_record() {
        let mut fq = AsyncFastqReader::from_async_bufread(&b"@e\n\n+\n"[..]);
        let rec = fq.next_record().await.unwrap().unwrap();
        assert_eq!(rec.id(), "e");
        assert!(rec.is_empty());
        assert!(fq.next_record().await.is_none());
    }

    #[tokio::test]
    async fn async_filter_matches_sync_semantics() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.fastq");
        tokio::fs::write(
            &input,
            "@low\nAAAAAAAAAA\n+\nIIIIIIIIII\n@mid\nGGGGGAAAAA\n+\nIIIIIIIIII\n@high\nGGGGGGGGAA\n+\nIIIIIIIIII\n",
        )
        .await
        .unwrap();

        let dest = Destination::new(dir.path().join("filtered"), "out.fastq");
        let opts = FilterOptions::default().gc_bounds((40.0, 60.0));
        let kept = filter_fastq_async(&input, &dest, &opts).await.unwrap();
        assert_eq!(kept, 1);
        let out = tokio::fs::read_to_string(dest.path()).await.unwrap();
        assert_eq!(out, "@mid\nGGGGGAAAAA\n+\nIIIIIIIIII\n");
    }

    #[tokio::test]
    async fn async_malformed_leaves_no_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.fastq");
        tokio::fs::write(&input, "@ok\nAC\n+\nII\n@bad\nACGT\n+\nII\n")
            .await
            .unwrap();
        let dest = Destination::new(dir.path().join("filtered"), "out.fastq");
        let err = filter_fastq_async(&input, &dest, &FilterOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { index: 2, .. }));
        assert!(!dest.path().exists());
    }

    #[tokio::test]
    async fn dropped_filter_leaves_no_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("big.fastq");
        let mut text = String::with_capacity(300_000 * 48);
        for i in 0..300_000 {
            text.push_str(&format!("@r{i}\nACGTACGTACGTACGT\n+\nIIIIIIIIIIIIIIII\n"));
        }
        tokio::fs::write(&input, text).await.unwrap();

        let dest = Destination::new(dir.path().join("filtered"), "out.fastq");
        let opts = FilterOptions::default();
        let run = filter_fastq_async(&input, &dest, &opts);
        let res = tokio::time::timeout(std::time::Duration::from_millis(1), run).await;
        assert!(res.is_err(), "filter finished before it could be cancelled");

        assert!(!dest.path().exists());
        if dest.dir.exists() {
            let left: Vec<_> = std::fs::read_dir(&dest.dir)
                .unwrap()
                .map(|e| e.unwrap().file_name())
                .collect();
            assert!(left.is_empty(), "left behind: {left:?}");
        }
    }
}
