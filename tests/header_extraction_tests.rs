//! Header extraction through `TxCodec`
//!
//! Each format returns the raw header bytes; the block hash helpers are
//! checked against the Bitcoin genesis block.


use blvm_txcodec::crypto::{blake256, double_sha256, hash_to_hex_str};
use blvm_txcodec::serialization::{serialize_transaction, write_varint};
use blvm_txcodec::types::*;
use blvm_txcodec::{DecodeError, DecoderConfig, Fork, TxCodec};
use test_helpers::*;

/// Coinbase, parent hash, empty branches, parent header
fn auxpow_proof(coinbase: &[u8]) -> Vec<u8> {
    let mut proof = coinbase.to_vec();
    proof.extend_from_slice(&[0xaa; 32]);
    proof.push(1);
    proof.extend_from_slice(&[0xbb; 32]);
    proof.extend_from_slice(&[0; 4]);
    proof.push(0);
    proof.extend_from_slice(&[0; 4]);
    proof.extend_from_slice(&[0xcc; 80]);
    proof
}

#[test]
fn test_genesis_header_hash() {
    let header = genesis_header();
    let codec = TxCodec::new(Fork::Bitcoin);

    let extracted = codec.read_header(&header, 0, 0).unwrap();
    assert_eq!(extracted, &header[..]);
    let hash = codec.header_hash(extracted).unwrap().unwrap();
    assert_eq!(hash_to_hex_str(&hash), GENESIS_BLOCK_HASH);
}

#[test]
fn test_genesis_block() {
    let mut raw = genesis_header();
    raw.extend_from_slice(&tx_list(&[genesis_coinbase()]));

    let (header, txs) = TxCodec::new(Fork::BitcoinSegWit).read_block(&raw, 0).unwrap();
    assert_eq!(header, &genesis_header()[..]);
    assert_eq!(txs.len(), 1);
    assert_eq!(hash_to_hex_str(&txs[0].1), GENESIS_COINBASE_TXID);
}

#[test]
fn test_header_at_offset() {
    let mut raw = vec![0xf9, 0xbe, 0xb4, 0xd9];
    raw.extend_from_slice(&genesis_header());
    let header = TxCodec::new(Fork::Bitcoin).read_header(&raw, 4, 0).unwrap();
    assert_eq!(header, &genesis_header()[..]);
}

#[test]
fn test_truncated_static_header() {
    let header = genesis_header();
    let result = TxCodec::new(Fork::Bitcoin).read_header(&header[..79], 0, 0);
    assert!(matches!(result, Err(DecodeError::BufferUnderflow { .. })));
}

#[test]
fn test_equihash_solution_is_included() {
    let mut raw = vec![0x04; 140];
    write_varint(&mut raw, 1344);
    raw.extend_from_slice(&[0x99; 1344]);
    let header_len = raw.len();
    raw.extend_from_slice(&tx_list(&[]));

    for fork in [Fork::Zcash, Fork::Equihash, Fork::EquihashSegWit] {
        let (header, txs) = TxCodec::new(fork).read_block(&raw, 0).unwrap();
        assert_eq!(header.len(), header_len, "{fork}");
        assert_eq!(header_len, 140 + 3 + 1344);
        assert!(txs.is_empty());
    }
}

#[test]
fn test_equihash_length_is_relative_to_start() {
    let mut header = vec![0x04; 140];
    write_varint(&mut header, 4);
    header.extend_from_slice(&[1, 2, 3, 4]);
    let mut raw = vec![0u8; 7];
    raw.extend_from_slice(&header);

    let extracted = TxCodec::new(Fork::Zcash).read_header(&raw, 7, 0).unwrap();
    assert_eq!(extracted, &header[..]);
}

#[test]
fn test_primecoin_multiplier() {
    let mut raw = static_header(2);
    raw.extend_from_slice(&[3, 0x01, 0x02, 0x03]);
    raw.extend_from_slice(&[0xee; 16]);
    let header = TxCodec::new(Fork::Primecoin).read_header(&raw, 0, 0).unwrap();
    assert_eq!(header.len(), 84);
}

#[test]
fn test_auxpow_only_with_version_bit() {
    let plain = static_header(2);
    let header = TxCodec::new(Fork::AuxPow).read_header(&plain, 0, 0).unwrap();
    assert_eq!(header.len(), 80);

    let mut merged = static_header(2 | 1 << 8);
    let proof = auxpow_proof(&genesis_coinbase());
    merged.extend_from_slice(&proof);
    merged.extend_from_slice(&[0x55; 8]);
    for fork in [Fork::AuxPow, Fork::AuxPowSegWit] {
        let header = TxCodec::new(fork).read_header(&merged, 0, 0).unwrap();
        assert_eq!(header.len(), 80 + proof.len(), "{fork}");
    }
}

#[test]
fn test_auxpow_coinbase_uses_fork_layout() {
    // Emercoin's parent coinbase carries a time field
    let coinbase = Transaction::TimeStamped(TimeStampedTx {
        version: 1,
        time: 1_400_000_000,
        time_placement: TimePlacement::AfterVersion,
        inputs: vec![coinbase_input(vec![0x03, 0x01, 0x02, 0x03])],
        outputs: vec![output(0)],
        locktime: 0,
        trailer: vec![],
    });
    let mut raw = static_header(1 | 1 << 8);
    let proof = auxpow_proof(&serialize_transaction(&coinbase));
    raw.extend_from_slice(&proof);

    let header = TxCodec::new(Fork::Emercoin).read_header(&raw, 0, 0).unwrap();
    assert_eq!(header.len(), 80 + proof.len());
}

#[test]
fn test_truncated_auxpow_is_error() {
    let mut raw = static_header(1 << 8);
    let proof = auxpow_proof(&genesis_coinbase());
    raw.extend_from_slice(&proof[..proof.len() - 1]);
    let result = TxCodec::new(Fork::AuxPow).read_header(&raw, 0, 0);
    assert!(matches!(result, Err(DecodeError::BufferUnderflow { .. })));
}

#[test]
fn test_xaya_headers() {
    // standalone: pure header, algo and bits, then a fake header
    let mut standalone = static_header(4);
    standalone.push(0x01);
    standalone.extend_from_slice(&[0xff; 4]);
    standalone.extend_from_slice(&[0x12; 80]);
    let codec = TxCodec::new(Fork::Xaya);
    assert_eq!(codec.read_header(&standalone, 0, 0).unwrap().len(), 165);

    // merge-mined: algo high bit selects an AuxPow proof
    let mut merged = static_header(4);
    merged.push(0x80 | 0x01);
    merged.extend_from_slice(&[0xff; 4]);
    let proof = auxpow_proof(&genesis_coinbase());
    merged.extend_from_slice(&proof);
    assert_eq!(codec.read_header(&merged, 0, 0).unwrap().len(), 85 + proof.len());
}

#[test]
fn test_bitcoin_atom_fork_height() {
    let mut raw = static_header(1);
    raw.extend_from_slice(&[0; 4]);

    let mut config = DecoderConfig::new(Fork::BitcoinAtom);
    config.bitcoin_atom_fork_height = 100;
    let codec = TxCodec::from_config(config);
    assert_eq!(codec.read_header(&raw, 0, 99).unwrap().len(), 80);
    assert_eq!(codec.read_header(&raw, 0, 100).unwrap().len(), 84);
    assert_eq!(codec.read_header(&raw, 0, 1_000_000).unwrap().len(), 84);
}

#[test]
fn test_decred_header() {
    let raw = vec![0x31u8; 180];
    let codec = TxCodec::new(Fork::Decred);
    let header = codec.read_header(&raw, 0, 0).unwrap();
    assert_eq!(header.len(), 180);
    assert_eq!(codec.header_hash(header).unwrap(), Some(blake256(header)));
}

#[test]
fn test_header_hash_per_fork() {
    let header = genesis_header();
    assert_eq!(
        TxCodec::new(Fork::Litecoin).header_hash(&header).unwrap(),
        Some(double_sha256(&header))
    );
    for fork in [Fork::Groestlcoin, Fork::Pivx, Fork::Verge] {
        assert_eq!(TxCodec::new(fork).header_hash(&header).unwrap(), None, "{fork}");
    }
    // keyed BLAKE2s needs at least the 80-byte header
    assert!(TxCodec::new(Fork::Trezarcoin).header_hash(&header[..40]).is_err());
    assert!(TxCodec::new(Fork::Trezarcoin)
        .header_hash(&header)
        .unwrap()
        .is_some());
}
