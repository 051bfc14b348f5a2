#![no_main]

use bytes::Bytes;
use imgsplit::{Chunk, Compacted, compact};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    let chunk = Chunk::new(Bytes::from(data.clone()), 0);

    match compact(chunk) {
        Compacted::Skipped { len } => {
            // Verify: only all-zero chunks are dropped
            assert_eq!(len, data.len());
            assert!(data.iter().all(|&b| b == 0));
        }
        Compacted::Kept { chunk, trimmed } => {
            // Verify: output ends in a non-zero byte
            assert_ne!(chunk.data().last().copied(), Some(0));
            assert!(!chunk.is_empty());

            // Verify: output is a prefix, the rest was zeros
            assert_eq!(chunk.len() + trimmed, data.len());
            assert_eq!(chunk.data().as_ref(), &data[..chunk.len()]);
            assert!(data[chunk.len()..].iter().all(|&b| b == 0));
        }
    }
});
