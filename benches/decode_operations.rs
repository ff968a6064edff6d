use blvm_txcodec::block::decode_transactions;
use blvm_txcodec::serialization::{serialize_transaction, serialize_tx_list};
use blvm_txcodec::types::*;
use blvm_txcodec::{ByteCursor, Fork, TxCodec};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn create_segwit_transaction(seed: u8, inputs: usize) -> Transaction {
    Transaction::SegWit(SegWitTx {
        version: 2,
        marker: 0,
        flag: 1,
        inputs: (0..inputs)
            .map(|i| {
                TxInput::Standard(StandardInput {
                    prevout: OutPoint {
                        hash: [seed; 32],
                        index: i as u32,
                    },
                    script: vec![],
                    sequence: 0xffff_fffd,
                })
            })
            .collect(),
        outputs: vec![TxOutput::Standard(StandardOutput {
            value: 5_000_000_000,
            pk_script: vec![
                0x00, 0x14, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c,
                0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14,
            ], // P2WPKH
        }],
        witness: (0..inputs)
            .map(|_| vec![vec![0x30; 71], vec![0x02; 33]])
            .collect(),
        locktime: 0,
    })
}

fn create_legacy_transaction(seed: u8) -> Transaction {
    Transaction::Legacy(LegacyTx {
        version: 1,
        inputs: vec![TxInput::Standard(StandardInput {
            prevout: OutPoint {
                hash: [seed; 32],
                index: 0,
            },
            script: vec![0x48; 107],
            sequence: 0xffff_ffff,
        })],
        outputs: vec![TxOutput::Standard(StandardOutput {
            value: 5_000_000_000,
            pk_script: vec![0x76, 0xa9, 0x14, 0x00, 0x88, 0xac],
        })],
        locktime: 0,
    })
}

fn benchmark_decode_tx(c: &mut Criterion) {
    let legacy = serialize_transaction(&create_legacy_transaction(1));
    let segwit = serialize_transaction(&create_segwit_transaction(2, 2));
    let codec = TxCodec::new(Fork::BitcoinSegWit);

    c.bench_function("decode_legacy_tx", |b| {
        b.iter(|| black_box(codec.decode_tx(black_box(&legacy)).unwrap()))
    });

    c.bench_function("decode_segwit_tx_2in", |b| {
        b.iter(|| black_box(codec.decode_tx(black_box(&segwit)).unwrap()))
    });

    let litecoin = TxCodec::new(Fork::Litecoin);
    c.bench_function("decode_litecoin_segwit_tx_2in", |b| {
        b.iter(|| black_box(litecoin.decode_tx(black_box(&segwit)).unwrap()))
    });
}

fn benchmark_read_tx_block(c: &mut Criterion) {
    let tx_counts = vec![10, 100, 1000];

    for tx_count in tx_counts {
        let txs: Vec<Transaction> = (0..tx_count)
            .map(|i| create_segwit_transaction(i as u8, 1 + i % 3))
            .collect();
        let raw = serialize_tx_list(&txs);
        let decoder = Fork::BitcoinSegWit.decoder();

        c.bench_function(&format!("read_tx_block_{}tx", tx_count), |b| {
            b.iter(|| {
                let mut cursor = ByteCursor::new(black_box(&raw));
                black_box(decoder.read_tx_block(&mut cursor).unwrap())
            })
        });
    }
}

fn benchmark_decode_transactions(c: &mut Criterion) {
    let serialized: Vec<Vec<u8>> = (0..1000)
        .map(|i| serialize_transaction(&create_segwit_transaction(i as u8, 2)))
        .collect();
    let refs: Vec<&[u8]> = serialized.iter().map(|v| v.as_slice()).collect();
    let decoder = Fork::BitcoinSegWit.decoder();

    c.bench_function("decode_transactions_1000", |b| {
        b.iter(|| black_box(decode_transactions(decoder, black_box(&refs))))
    });
}

criterion_group!(
    benches,
    benchmark_decode_tx,
    benchmark_read_tx_block,
    benchmark_decode_transactions
);

criterion_main!(benches);
