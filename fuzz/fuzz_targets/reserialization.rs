#![no_main]
use blvm_txcodec::serialization::serialize_transaction;
use blvm_txcodec::{ByteCursor, Fork};
use libfuzzer_sys::fuzz_target;

/// Forks whose decoded value retains every byte it consumed
const LOSSLESS_FORKS: [Fork; 9] = [
    Fork::BitcoinSegWit,
    Fork::TxTime,
    Fork::TxTimeSegWit,
    Fork::NavCoin,
    Fork::Reddcoin,
    Fork::Eccoin,
    Fork::Trezarcoin,
    Fork::TokenPay,
    Fork::BitcoinDiamondSegWit,
];

fuzz_target!(|data: &[u8]| {
    for fork in LOSSLESS_FORKS {
        let decoder = fork.decoder();
        let mut cursor = ByteCursor::new(data);
        let Ok(outcome) = decoder.read_tx_parts(&mut cursor) else {
            continue;
        };
        let Some(parts) = outcome.decoded() else {
            continue;
        };

        let consumed = &data[..cursor.position()];
        let reencoded = serialize_transaction(&parts.tx);
        // Non-minimal varints are accepted on input but written minimally
        if reencoded.len() != consumed.len() {
            assert!(reencoded.len() < consumed.len(), "{fork}");
            continue;
        }
        assert_eq!(&reencoded[..], consumed, "{fork}: re-encoding must reproduce the consumed bytes");

        let again = decoder
            .read_tx_parts(&mut ByteCursor::new(&reencoded))
            .unwrap()
            .decoded()
            .unwrap();
        assert_eq!(again.tx_hash, parts.tx_hash, "{fork}: id must survive re-encoding");
    }
});
