//! Zcash NU5 (v5) transaction id digest (ZIP-244)
//!
//! The v5 decoder records where each bundle lives in the raw buffer while it
//! walks the transaction; the digest tree is then computed straight from
//! those spans. Nothing is parsed twice.

use crate::types::{Hash, TxInput};
use blake2b_simd::{Params, State};

/// Sapling v5 spend record: cv, nullifier, rk
pub const SAPLING_SPEND_SIZE: usize = 96;
/// Sapling v5 output record: cv, cmu, ephemeral key, enc ciphertext, out ciphertext
pub const SAPLING_OUTPUT_SIZE: usize = 756;
/// Orchard action record: cv, nullifier, rk, cmx, ephemeral key, enc, out
pub const ORCHARD_ACTION_SIZE: usize = 820;

const ENC_CIPHERTEXT_SIZE: usize = 580;
const COMPACT_NOTE_SIZE: usize = 52;
const MEMO_END: usize = 564;

/// Byte spans of a v5 transaction, borrowed from the raw buffer
#[derive(Debug, Clone, Copy)]
pub struct V5Spans<'a> {
    /// header, version group id, branch id, locktime, expiry height (20 bytes)
    pub header: &'a [u8],
    pub branch_id: u32,
    /// Serialized transparent outputs without the leading count
    pub transparent_outputs: &'a [u8],
    pub transparent_output_count: u64,
    /// `n × 96` bytes
    pub sapling_spends: &'a [u8],
    /// `n × 756` bytes
    pub sapling_outputs: &'a [u8],
    /// 8 bytes when the Sapling bundle is non-empty
    pub sapling_value_balance: &'a [u8],
    /// 32 bytes when there is at least one spend
    pub sapling_anchor: &'a [u8],
    /// `n × 820` bytes
    pub orchard_actions: &'a [u8],
    /// flags ‖ valueBalance ‖ anchor (41 bytes) when there are actions
    pub orchard_tail: &'a [u8],
}

fn personal(personalization: &[u8; 16]) -> State {
    Params::new()
        .hash_length(32)
        .personal(personalization)
        .to_state()
}

fn finish(state: &State) -> Hash {
    let mut out = [0u8; 32];
    out.copy_from_slice(state.finalize().as_bytes());
    out
}

fn empty(personalization: &[u8; 16]) -> Hash {
    finish(&personal(personalization))
}

/// Compute the v5 transaction id
pub fn v5_txid(spans: &V5Spans<'_>, inputs: &[TxInput]) -> Hash {
    let mut personalization = [0u8; 16];
    personalization[..12].copy_from_slice(b"ZcashTxHash_");
    personalization[12..].copy_from_slice(&spans.branch_id.to_le_bytes());

    let mut state = personal(&personalization);
    state.update(&header_digest(spans));
    state.update(&transparent_digest(spans, inputs));
    state.update(&sapling_digest(spans));
    state.update(&orchard_digest(spans));
    finish(&state)
}

fn header_digest(spans: &V5Spans<'_>) -> Hash {
    let mut state = personal(b"ZTxIdHeadersHash");
    state.update(spans.header);
    finish(&state)
}

fn transparent_digest(spans: &V5Spans<'_>, inputs: &[TxInput]) -> Hash {
    if inputs.is_empty() && spans.transparent_output_count == 0 {
        return empty(b"ZTxIdTranspaHash");
    }

    let mut prevouts = personal(b"ZTxIdPrevoutHash");
    let mut sequences = personal(b"ZTxIdSequencHash");
    for input in inputs {
        if let Some(prevout) = input.prevout() {
            prevouts.update(&prevout.hash);
            prevouts.update(&prevout.index.to_le_bytes());
        }
        sequences.update(&input.sequence().to_le_bytes());
    }
    let mut outputs = personal(b"ZTxIdOutputsHash");
    outputs.update(spans.transparent_outputs);

    let mut state = personal(b"ZTxIdTranspaHash");
    state.update(&finish(&prevouts));
    state.update(&finish(&sequences));
    state.update(&finish(&outputs));
    finish(&state)
}

fn sapling_digest(spans: &V5Spans<'_>) -> Hash {
    let mut state = personal(b"ZTxIdSaplingHash");
    if !spans.sapling_spends.is_empty() || !spans.sapling_outputs.is_empty() {
        state.update(&sapling_spends_digest(spans));
        state.update(&sapling_outputs_digest(spans));
        state.update(spans.sapling_value_balance);
    }
    finish(&state)
}

fn sapling_spends_digest(spans: &V5Spans<'_>) -> Hash {
    let mut state = personal(b"ZTxIdSSpendsHash");
    if !spans.sapling_spends.is_empty() {
        let mut compact = personal(b"ZTxIdSSpendCHash");
        let mut noncompact = personal(b"ZTxIdSSpendNHash");
        for spend in spans.sapling_spends.chunks_exact(SAPLING_SPEND_SIZE) {
            let (cv, rest) = spend.split_at(32);
            let (nullifier, rk) = rest.split_at(32);
            compact.update(nullifier);
            noncompact.update(cv);
            noncompact.update(spans.sapling_anchor);
            noncompact.update(rk);
        }
        state.update(&finish(&compact));
        state.update(&finish(&noncompact));
    }
    finish(&state)
}

fn sapling_outputs_digest(spans: &V5Spans<'_>) -> Hash {
    let mut state = personal(b"ZTxIdSOutputHash");
    if !spans.sapling_outputs.is_empty() {
        let mut compact = personal(b"ZTxIdSOutC__Hash");
        let mut memos = personal(b"ZTxIdSOutM__Hash");
        let mut noncompact = personal(b"ZTxIdSOutN__Hash");
        for output in spans.sapling_outputs.chunks_exact(SAPLING_OUTPUT_SIZE) {
            let cv = &output[..32];
            let cmu = &output[32..64];
            let epk = &output[64..96];
            let enc = &output[96..96 + ENC_CIPHERTEXT_SIZE];
            let out = &output[96 + ENC_CIPHERTEXT_SIZE..];
            compact.update(cmu);
            compact.update(epk);
            compact.update(&enc[..COMPACT_NOTE_SIZE]);
            memos.update(&enc[COMPACT_NOTE_SIZE..MEMO_END]);
            noncompact.update(cv);
            noncompact.update(&enc[MEMO_END..]);
            noncompact.update(out);
        }
        state.update(&finish(&compact));
        state.update(&finish(&memos));
        state.update(&finish(&noncompact));
    }
    finish(&state)
}

fn orchard_digest(spans: &V5Spans<'_>) -> Hash {
    let mut state = personal(b"ZTxIdOrchardHash");
    if !spans.orchard_actions.is_empty() {
        let mut compact = personal(b"ZTxIdOrcActCHash");
        let mut memos = personal(b"ZTxIdOrcActMHash");
        let mut noncompact = personal(b"ZTxIdOrcActNHash");
        for action in spans.orchard_actions.chunks_exact(ORCHARD_ACTION_SIZE) {
            let cv = &action[..32];
            let nullifier = &action[32..64];
            let rk = &action[64..96];
            let cmx = &action[96..128];
            let epk = &action[128..160];
            let enc = &action[160..160 + ENC_CIPHERTEXT_SIZE];
            let out = &action[160 + ENC_CIPHERTEXT_SIZE..];
            compact.update(nullifier);
            compact.update(cmx);
            compact.update(epk);
            compact.update(&enc[..COMPACT_NOTE_SIZE]);
            memos.update(&enc[COMPACT_NOTE_SIZE..MEMO_END]);
            noncompact.update(cv);
            noncompact.update(rk);
            noncompact.update(&enc[MEMO_END..]);
            noncompact.update(out);
        }
        state.update(&finish(&compact));
        state.update(&finish(&memos));
        state.update(&finish(&noncompact));
        state.update(spans.orchard_tail);
    }
    finish(&state)
}
