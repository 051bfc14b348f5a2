#![no_main]

use std::io::Cursor;

use imgsplit::ChunkIter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u16, Vec<u8>)| {
    let (size, data) = input;
    let chunk_size = size as usize % 1024 + 1;
    let total = data.len() as u64;

    let chunks: Vec<_> = ChunkIter::new(Cursor::new(&data), chunk_size, total)
        .collect::<Result<_, _>>()
        .unwrap();

    // Verify: one iteration per window, plus the terminating one
    assert_eq!(chunks.len(), data.len() / chunk_size + 1);

    // Verify: offsets step by chunk_size and the chunks partition the input
    let mut rebuilt = Vec::with_capacity(data.len());
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.offset(), (i * chunk_size) as u64);
        assert!(chunk.len() <= chunk_size);
        rebuilt.extend_from_slice(chunk.data());
    }
    assert_eq!(rebuilt, data);
});
