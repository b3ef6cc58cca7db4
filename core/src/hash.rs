use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]").expect("valid regex");
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the word's bytes after lowercasing and dropping anything outside `[a-z0-9]`.
pub fn word_hash(word: &str) -> u64 {
    let lowered = word.to_lowercase();
    let canonical = NON_ALNUM.replace_all(&lowered, "");
    canonical.bytes().fold(FNV_OFFSET_BASIS, |h, b| (h ^ b as u64).wrapping_mul(FNV_PRIME))
}

/// Bucket slot for `word` in a table of `size` slots. `size` must be non-zero.
#[inline]
pub fn bucket_for(word: &str, size: usize) -> usize {
    (word_hash(word) % size as u64) as usize
}
