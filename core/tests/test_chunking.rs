// Chunk reader: counts, sizes, ids and the empty-input fast path.

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::Bytes;
    use chunkpress_core::constants::MAX_CHUNK_SIZE;
    use chunkpress_core::stream::chunking::{expected_chunk_count, read_chunks, split_into_chunks};
    use chunkpress_core::types::StreamError;
    use proptest::prelude::*;

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 % 251) as u8).collect()
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunks = read_chunks(&mut Cursor::new(Vec::<u8>::new()), 16).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn exact_multiple_has_no_short_tail() {
        let data = pattern(64);
        let chunks = read_chunks(&mut Cursor::new(data.clone()), 16).unwrap();
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| c.payload.len() == 16));
    }

    #[test]
    fn short_tail_is_kept() {
        let data = pattern(17);
        let chunks = read_chunks(&mut Cursor::new(data.clone()), 16).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].payload.len(), 1);
        assert_eq!(chunks[1].payload[0], data[16]);
    }

    #[test]
    fn single_byte_is_one_chunk() {
        let chunks = read_chunks(&mut Cursor::new(vec![7u8]), 1024).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id, 0);
        assert_eq!(&chunks[0].payload[..], &[7u8]);
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let res = read_chunks(&mut Cursor::new(vec![1u8, 2, 3]), 0);
        assert!(matches!(res, Err(StreamError::Validation(_))));
    }

    #[test]
    fn oversized_chunk_size_is_rejected() {
        let res = split_into_chunks(Bytes::from_static(b"abc"), MAX_CHUNK_SIZE + 1);
        assert!(matches!(res, Err(StreamError::Validation(_))));
    }

    #[test]
    fn chunks_share_the_input_allocation() {
        let data = Bytes::from(pattern(40));
        let chunks = split_into_chunks(data.clone(), 10).unwrap();
        assert_eq!(chunks[2].payload.as_ptr(), data[20..].as_ptr());
    }

    proptest! {
        #[test]
        fn prop_split_matches_ceil(len in 0usize..5000, chunk_size in 1usize..700) {
            let data = pattern(len);
            let chunks = read_chunks(&mut Cursor::new(data.clone()), chunk_size).unwrap();

            prop_assert_eq!(chunks.len(), expected_chunk_count(len, chunk_size));
            prop_assert_eq!(chunks.len(), (len + chunk_size - 1) / chunk_size);

            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.id, i as u64);
                if i + 1 < chunks.len() {
                    prop_assert_eq!(chunk.payload.len(), chunk_size);
                } else {
                    prop_assert!(!chunk.payload.is_empty());
                    prop_assert!(chunk.payload.len() <= chunk_size);
                }
            }

            let joined: Vec<u8> = chunks.iter().flat_map(|c| c.payload.iter().copied()).collect();
            prop_assert_eq!(joined, data);
        }
    }
}
