// End-to-end pipeline: round-trip law, frame order, truncation and
// per-chunk failures surfacing with their chunk id.

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read, Write};
    use std::sync::Arc;

    use chunkpress_core::compression::{create_codec, Codec, CodecError, CodecKind};
    use chunkpress_core::prelude::*;
    use chunkpress_core::stream::framing::{decode_all, FrameError};
    use chunkpress_core::stream::pipeline::{run_compress_pipeline, run_decompress_pipeline};
    use chunkpress_core::telemetry::{Direction, Stage};
    use proptest::prelude::*;

    fn config(chunk_size: usize, workers: usize, codec: CodecKind) -> PipelineConfig {
        PipelineConfig::new(chunk_size, Some(workers), codec, None)
    }

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i.wrapping_mul(31) % 251) as u8).collect()
    }

    fn roundtrip(data: &[u8], cfg: &PipelineConfig) -> Vec<u8> {
        let packed = compress_bytes(data, cfg).unwrap();
        decompress_bytes(&packed, cfg).unwrap()
    }

    /// Fails on one chunk, identified by its first byte.
    struct FailOn(u8);

    impl Codec for FailOn {
        fn kind(&self) -> CodecKind {
            CodecKind::Lz4
        }
        fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
            if input.first() == Some(&self.0) {
                return Err(CodecError::Process { codec: "fail-on".into(), msg: "boom".into() });
            }
            Ok(input.to_vec())
        }
        fn decompress(&self, input: &[u8], _max: usize) -> Result<Vec<u8>, CodecError> {
            Ok(input.to_vec())
        }
    }

    struct PanicOn(u8);

    impl Codec for PanicOn {
        fn kind(&self) -> CodecKind {
            CodecKind::Lz4
        }
        fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
            if input.first() == Some(&self.0) {
                panic!("codec exploded");
            }
            Ok(input.to_vec())
        }
        fn decompress(&self, input: &[u8], _max: usize) -> Result<Vec<u8>, CodecError> {
            Ok(input.to_vec())
        }
    }

    /// Sink whose every write fails, like a full disk.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Yields `data`, then fails instead of reporting EOF.
    struct BrokenAfter {
        data: Cursor<Vec<u8>>,
    }

    impl Read for BrokenAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "link dropped")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn boundary_lengths_roundtrip_for_every_codec() {
        let chunk = 1024;
        for codec in [CodecKind::Deflate, CodecKind::Zstd, CodecKind::Lz4] {
            let cfg = config(chunk, 4, codec);
            for len in [0, 1, chunk - 1, chunk, chunk + 1, 5 * chunk + 17] {
                let data = sample(len);
                assert_eq!(roundtrip(&data, &cfg), data, "{codec} len={len}");
            }
        }
    }

    #[test]
    fn empty_input_produces_empty_stream() {
        let cfg = PipelineConfig::default();
        assert!(compress_bytes(&[], &cfg).unwrap().is_empty());
        assert!(decompress_bytes(&[], &cfg).unwrap().is_empty());
    }

    #[test]
    fn three_megabytes_make_three_ordered_frames() {
        let chunk = 1 << 20;
        let mut data = Vec::with_capacity(3 * chunk);
        for tag in [b'A', b'B', b'C'] {
            data.extend(std::iter::repeat(tag).take(chunk));
        }

        let cfg = config(chunk, 8, CodecKind::Deflate);
        let packed = compress_bytes(&data, &cfg).unwrap();
        let frames = decode_all(&packed).unwrap();
        assert_eq!(frames.len(), 3);

        let codec = create_codec(CodecKind::Deflate, None).unwrap();
        for (frame, tag) in frames.iter().zip([b'A', b'B', b'C']) {
            let raw = codec.decompress(frame.payload, chunk).unwrap();
            assert_eq!(raw.len(), chunk);
            assert!(raw.iter().all(|&b| b == tag));
        }
    }

    #[test]
    fn output_is_independent_of_worker_count() {
        let data = sample(50_000);
        let single = compress_bytes(&data, &config(999, 1, CodecKind::Zstd)).unwrap();
        for workers in [2, 3, 16] {
            let multi = compress_bytes(&data, &config(999, workers, CodecKind::Zstd)).unwrap();
            assert_eq!(multi, single, "workers={workers}");
        }
    }

    #[test]
    fn truncated_tail_names_last_frame() {
        let cfg = config(1000, 2, CodecKind::Deflate);
        let data = sample(3500);
        let mut packed = compress_bytes(&data, &cfg).unwrap();
        packed.pop();

        match decompress_bytes(&packed, &cfg) {
            Err(err @ StreamError::Format { source: FrameError::TruncatedPayload { .. }, .. }) => {
                assert_eq!(err.frame_index(), Some(3));
                assert_eq!(err.chunk_id(), None);
            }
            other => panic!("expected truncated payload, got {other:?}"),
        }
    }

    #[test]
    fn write_failure_is_io_error() {
        let codec = create_codec(CodecKind::Deflate, None).unwrap();
        let cfg = config(1000, 2, CodecKind::Deflate);
        let err = run_compress_pipeline(&mut Cursor::new(sample(4000)), FullDisk, codec, &cfg).unwrap_err();
        assert!(matches!(err, StreamError::Io(ref e) if e.to_string() == "disk full"), "{err:?}");
        assert_eq!(err.frame_index(), None);
    }

    #[test]
    fn read_failure_mid_stream_is_io_error() {
        let cfg = config(1000, 2, CodecKind::Lz4);
        let packed = compress_bytes(&sample(2500), &cfg).unwrap();
        let codec = create_codec(CodecKind::Lz4, None).unwrap();

        let reader = BrokenAfter { data: Cursor::new(packed) };
        let err = run_decompress_pipeline(reader, Vec::new(), codec, 1000).unwrap_err();
        assert!(
            matches!(err, StreamError::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset),
            "{err:?}"
        );
    }

    #[test]
    fn truncated_prefix_is_format_error() {
        let cfg = config(1000, 2, CodecKind::Lz4);
        let mut packed = compress_bytes(&sample(1000), &cfg).unwrap();
        packed.extend_from_slice(&[7, 0]);

        let err = decompress_bytes(&packed, &cfg).unwrap_err();
        assert!(matches!(
            err,
            StreamError::Format { frame_index: 1, source: FrameError::TruncatedLength { actual: 2 } }
        ));
    }

    #[test]
    fn decompress_bound_rejects_larger_chunks() {
        let packed = compress_bytes(&sample(4096), &config(4096, 1, CodecKind::Zstd)).unwrap();
        let err = decompress_bytes(&packed, &config(1024, 1, CodecKind::Zstd)).unwrap_err();
        assert!(matches!(
            err,
            StreamError::Codec { chunk_id: 0, source: CodecError::OutputTooLarge { max: 1024, .. } }
        ));
    }

    #[test]
    fn wrong_codec_is_a_codec_error() {
        let packed = compress_bytes(&sample(4096), &config(4096, 1, CodecKind::Zstd)).unwrap();
        let err = decompress_bytes(&packed, &config(4096, 1, CodecKind::Deflate)).unwrap_err();
        assert_eq!(err.chunk_id(), Some(0));
    }

    #[test]
    fn codec_failure_names_the_chunk() {
        // chunk i starts with byte i
        let chunk = 64;
        let data: Vec<u8> = (0..10u8).flat_map(|i| std::iter::repeat(i).take(chunk)).collect();
        let codec: Arc<dyn Codec> = Arc::new(FailOn(6));

        let mut out = Vec::new();
        let err = run_compress_pipeline(&mut Cursor::new(data), &mut out, codec, &config(chunk, 4, CodecKind::Lz4))
            .unwrap_err();
        match err {
            StreamError::Codec { chunk_id, source: CodecError::Process { .. } } => assert_eq!(chunk_id, 6),
            other => panic!("expected codec error, got {other:?}"),
        }
        assert!(out.is_empty(), "no frame may be written after a failed chunk");
    }

    #[test]
    fn codec_panic_names_the_chunk() {
        let chunk = 32;
        let data: Vec<u8> = (0..6u8).flat_map(|i| std::iter::repeat(i).take(chunk)).collect();
        let codec: Arc<dyn Codec> = Arc::new(PanicOn(2));

        let mut out = Vec::new();
        let err = run_compress_pipeline(&mut Cursor::new(data), &mut out, codec, &config(chunk, 3, CodecKind::Lz4))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("chunk 2"), "{msg}");
        assert!(msg.contains("codec exploded"), "{msg}");
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let data = sample(10);
        assert!(matches!(
            compress_bytes(&data, &config(0, 1, CodecKind::Deflate)),
            Err(StreamError::Validation(_))
        ));
        assert!(matches!(
            compress_bytes(&data, &PipelineConfig::new(16, Some(0), CodecKind::Deflate, None)),
            Err(StreamError::Validation(_))
        ));
        assert!(matches!(
            compress_bytes(&data, &PipelineConfig::new(16, None, CodecKind::Deflate, Some(42))),
            Err(StreamError::CodecConfig(CodecError::InvalidLevel { .. }))
        ));
    }

    #[test]
    fn telemetry_matches_stream() {
        let cfg = config(1000, 3, CodecKind::Deflate);
        let data = sample(4500);
        let snap = compress_stream(
            InputSource::Memory(data.clone()),
            OutputSink::Memory,
            &cfg,
            ApiConfig::with_buf_enabled(),
        )
        .unwrap();

        assert_eq!(snap.direction, Direction::Compress);
        assert_eq!(snap.chunks, 5);
        assert_eq!(snap.workers, 3);
        assert_eq!(snap.bytes_input, 4500);
        assert!(snap.sanity_check());
        assert!(snap.has_all_stages(&[Stage::Read, Stage::Compress, Stage::Reorder, Stage::Write]));
        assert!(!snap.has_all_stages(&[Stage::Decompress]));
        assert_eq!(snap.stage_times.get_ms(Stage::Decompress), 0.0);
        assert!(snap.stage_times.get_ms(Stage::Compress) > 0.0);

        let packed = snap.output.clone().unwrap();
        assert_eq!(snap.bytes_output, packed.len() as u64);

        let back = decompress_stream(
            InputSource::Memory(packed),
            OutputSink::Memory,
            &cfg,
            ApiConfig::with_buf_enabled(),
        )
        .unwrap();
        assert_eq!(back.direction, Direction::Decompress);
        assert_eq!(back.frames, 5);
        assert!(back.sanity_check());
        assert!(back.has_all_stages(&[Stage::Read, Stage::Decompress, Stage::Write]));
        assert_eq!(back.output.unwrap(), data);

        let json = snap.to_json().unwrap();
        assert!(json.contains("\"direction\": \"compress\""));
    }

    #[test]
    fn memory_sink_without_capture_discards_output() {
        let snap = compress_stream(
            InputSource::Memory(sample(100)),
            OutputSink::Memory,
            &PipelineConfig::default(),
            ApiConfig::default(),
        )
        .unwrap();
        assert!(snap.output.is_none());
        assert_eq!(snap.frames, 1);
    }

    #[test]
    fn decompress_pipeline_rejects_bad_bound() {
        let codec = create_codec(CodecKind::Deflate, None).unwrap();
        let err = run_decompress_pipeline(Cursor::new(Vec::new()), Vec::new(), codec, 0).unwrap_err();
        assert!(matches!(err, StreamError::Validation(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]
        #[test]
        fn prop_roundtrip_any_chunking(
            data in proptest::collection::vec(any::<u8>(), 0..4096),
            chunk in 1usize..600,
            workers in 1usize..6,
        ) {
            let cfg = config(chunk, workers, CodecKind::Lz4);
            let packed = compress_bytes(&data, &cfg).unwrap();
            prop_assert_eq!(decode_all(&packed).unwrap().len(), data.len().div_ceil(chunk));
            prop_assert_eq!(decompress_bytes(&packed, &cfg).unwrap(), data);
        }
    }
}
