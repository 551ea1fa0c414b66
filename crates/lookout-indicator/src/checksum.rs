//! Bitcoin address checksums: base58check and bech32/bech32m.

use sha2::{Digest, Sha256};

const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const BECH32_GENERATOR: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];
const BECH32_CONST: u32 = 1;
const BECH32M_CONST: u32 = 0x2bc8_30a3;

/// P2PKH and P2SH version bytes on mainnet.
const BTC_VERSIONS: [u8; 2] = [0x00, 0x05];

/// Decode a base58 string into bytes. `None` on characters outside the alphabet.
pub(crate) fn base58_decode(s: &str) -> Option<Vec<u8>> {
    // little-endian accumulator
    let mut bytes: Vec<u8> = Vec::with_capacity(s.len());
    for c in s.bytes() {
        let digit = BASE58_ALPHABET.iter().position(|&a| a == c)?;
        let mut carry = u32::try_from(digit).ok()?;
        for b in &mut bytes {
            carry += u32::from(*b) * 58;
            *b = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }
    let leading_zeros = s.bytes().take_while(|&c| c == b'1').count();
    bytes.extend(std::iter::repeat(0).take(leading_zeros));
    bytes.reverse();
    Some(bytes)
}

/// Legacy address: 25 decoded bytes, known version, double-SHA256 checksum.
pub(crate) fn is_base58check_address(s: &str) -> bool {
    let Some(decoded) = base58_decode(s) else {
        return false;
    };
    if decoded.len() != 25 || !BTC_VERSIONS.contains(&decoded[0]) {
        return false;
    }
    let (payload, checksum) = decoded.split_at(21);
    let digest = Sha256::digest(Sha256::digest(payload));
    digest[..4] == *checksum
}

fn polymod(values: impl Iterator<Item = u8>) -> u32 {
    let mut chk: u32 = 1;
    for v in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(v);
        for (i, g) in BECH32_GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= g;
            }
        }
    }
    chk
}

fn hrp_expand(hrp: &[u8]) -> Vec<u8> {
    hrp.iter()
        .map(|c| c >> 5)
        .chain(std::iter::once(0))
        .chain(hrp.iter().map(|c| c & 31))
        .collect()
}

/// Regroup 5-bit words into bytes, rejecting non-zero padding.
fn words_to_bytes(words: &[u8]) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(words.len() * 5 / 8);
    for &w in words {
        acc = (acc << 5) | u32::from(w);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if bits >= 5 || (acc << (8 - bits)) & 0xff != 0 {
        return None;
    }
    Some(out)
}

/// Segwit address with `bc` HRP: bech32 for v0, bech32m for v1..=16.
pub(crate) fn is_segwit_address(s: &str) -> bool {
    let has_lower = s.bytes().any(|c| c.is_ascii_lowercase());
    let has_upper = s.bytes().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return false;
    }
    let lower = s.to_ascii_lowercase();
    let Some((hrp, data)) = lower.rsplit_once('1') else {
        return false;
    };
    if hrp != "bc" || data.len() < 7 {
        return false;
    }

    let Some(words) = data
        .bytes()
        .map(|c| {
            BECH32_CHARSET
                .iter()
                .position(|&a| a == c)
                .and_then(|p| u8::try_from(p).ok())
        })
        .collect::<Option<Vec<u8>>>()
    else {
        return false;
    };

    let check = polymod(hrp_expand(hrp.as_bytes()).into_iter().chain(words.iter().copied()));
    let version = words[0];
    let expected = match version {
        0 => BECH32_CONST,
        1..=16 => BECH32M_CONST,
        _ => return false,
    };
    if check != expected {
        return false;
    }

    let Some(program) = words_to_bytes(&words[1..words.len() - 6]) else {
        return false;
    };
    match version {
        0 => program.len() == 20 || program.len() == 32,
        _ => (2..=40).contains(&program.len()),
    }
}
