use bitcoin::bip32::{ChildNumber, DerivationPath};

use crate::apdu::{
    APDUCmdVec, CommandCode, Curve, CLA, MAX_APDU_SIZE, P1_DISPLAY_ADDRESS, P1_FIRST_CHUNK,
    P1_MASK_MORE_BLOCKS, P1_SUBSEQUENT_CHUNK, P2_MASK_CHAIN_CODE,
};

/// Encodes a derivation path the way the app parses it: one byte with the
/// segment count, then every segment as a big-endian u32 in path order.
pub fn encode_path(path: &DerivationPath) -> Vec<u8> {
    let child_numbers: &[ChildNumber] = path.as_ref();
    child_numbers
        .iter()
        .fold(vec![child_numbers.len() as u8], |mut acc, &x| {
            acc.extend_from_slice(&u32::from(x).to_be_bytes());
            acc
        })
}

/// Transaction bytes that fit next to the path prefix in the first signing
/// chunk. Zero means the prefix alone overflows the APDU.
pub fn first_chunk_capacity(path: &DerivationPath) -> usize {
    MAX_APDU_SIZE.saturating_sub(1 + 4 * path.len())
}

/// Creates the APDU command to derive the address for `path`, optionally
/// displaying it on the device for user confirmation and optionally asking
/// for the 32-byte chain code to be appended to the response.
pub fn get_address(
    path: &DerivationPath,
    display: bool,
    request_chain_code: bool,
    curve: Curve,
) -> APDUCmdVec {
    let p1 = if display { P1_DISPLAY_ADDRESS } else { 0x00 };
    let mut p2 = curve as u8;
    if request_chain_code {
        p2 |= P2_MASK_CHAIN_CODE;
    }

    APDUCmdVec {
        cla: CLA,
        ins: CommandCode::GetAddress as u8,
        p1,
        p2,
        data: encode_path(path),
    }
}

/// Creates the APDU command to read the app's version.
pub fn get_app_configuration() -> APDUCmdVec {
    APDUCmdVec {
        cla: CLA,
        ins: CommandCode::GetAppConfiguration as u8,
        p1: 0x00,
        p2: 0x00,
        data: Vec::new(),
    }
}

/// Splits `raw_tx` into the APDU sequence of one signing exchange.
///
/// The first chunk carries the encoded path prefix, so its payload capacity
/// shrinks accordingly; continuation chunks use the full APDU. Every chunk
/// except the last sets the more-blocks bit in p1, and every chunk except
/// the last is filled to capacity. An empty transaction still yields the
/// single prefix-only chunk the app expects.
///
/// Callers must have checked that the prefix leaves room in the first chunk,
/// see [`first_chunk_capacity`].
pub fn sign_transaction(path: &DerivationPath, raw_tx: &[u8], curve: Curve) -> Vec<APDUCmdVec> {
    let prefix = encode_path(path);
    debug_assert!(prefix.len() < MAX_APDU_SIZE);

    let mut chunks = Vec::new();
    let mut offset = 0;
    loop {
        let first = offset == 0;
        let capacity = if first {
            MAX_APDU_SIZE - prefix.len()
        } else {
            MAX_APDU_SIZE
        };
        let remaining = raw_tx.len() - offset;
        let has_more = remaining > capacity;
        let size = if has_more { capacity } else { remaining };

        let mut data = if first {
            prefix.clone()
        } else {
            Vec::with_capacity(size)
        };
        data.extend_from_slice(&raw_tx[offset..offset + size]);

        let mut p1 = if first {
            P1_FIRST_CHUNK
        } else {
            P1_SUBSEQUENT_CHUNK
        };
        if has_more {
            p1 |= P1_MASK_MORE_BLOCKS;
        }

        chunks.push(APDUCmdVec {
            cla: CLA,
            ins: CommandCode::SignTransaction as u8,
            p1,
            p2: curve as u8,
            data,
        });

        offset += size;
        if offset == raw_tx.len() {
            break;
        }
    }
    chunks
}
