#![no_main]
use blvm_txcodec::{ByteCursor, Fork, Outcome, TxCodec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte selects the fork; the rest is the wire buffer
    let Some((&selector, raw)) = data.split_first() else {
        return;
    };
    let fork = Fork::ALL[selector as usize % Fork::ALL.len()];
    let codec = TxCodec::new(fork);

    // Single transaction: consumed span stays within the buffer
    let mut cursor = ByteCursor::new(raw);
    if let Ok(outcome) = codec.decoder().read_tx_parts(&mut cursor) {
        assert!(cursor.position() <= raw.len());
        if let Outcome::Decoded(parts) = outcome {
            assert!(
                parts.vsize <= cursor.position() as u64,
                "vsize must not exceed the consumed bytes"
            );
        }
    }

    // Block body: errors are fine, panics are not
    let _ = codec.read_tx_block(raw);
});
