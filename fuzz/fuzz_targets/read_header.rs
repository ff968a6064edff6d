#![no_main]
use blvm_txcodec::{Fork, TxCodec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }
    let fork = Fork::ALL[data[0] as usize % Fork::ALL.len()];
    let height = u32::from_le_bytes([data[1], data[2], data[3], data[4]]) as u64;
    let raw = &data[5..];
    let codec = TxCodec::new(fork);

    if let Ok(header) = codec.read_header(raw, 0, height) {
        // Extracted header is a prefix of the buffer
        assert!(header.len() <= raw.len());
        assert_eq!(header, &raw[..header.len()]);
        let _ = codec.header_hash(header);
    }
});
