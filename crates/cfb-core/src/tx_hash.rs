//! Fabricated transaction references. Display placeholders only; they carry
//! no integrity guarantees.

use crate::random::RandomSource;

/// Base32-style alphabet: `A-Z` then `2-7`.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
pub const TX_HASH_LEN: usize = 52;

pub fn fabricate(rng: &mut dyn RandomSource) -> String {
    (0..TX_HASH_LEN)
        .map(|_| ALPHABET[rng.pick_index(ALPHABET.len())] as char)
        .collect()
}

pub fn is_well_formed(hash: &str) -> bool {
    hash.len() == TX_HASH_LEN && hash.bytes().all(|b| ALPHABET.contains(&b))
}

/// First `n` characters followed by an ellipsis, as shown in receipts and toasts.
pub fn short(hash: &str, n: usize) -> String {
    let head: String = hash.chars().take(n).collect();
    format!("{head}...")
}
