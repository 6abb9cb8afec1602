//! Deterministic avatar selection.
//!
//! The hash must stay bit-for-bit stable: changing it changes which avatar
//! every existing student is shown.

/// Avatar styles, in selection order.
pub const AVATAR_VARIANTS: [&str; 6] = [
    "avataaars",
    "bottts",
    "fun-emoji",
    "lorelei",
    "micah",
    "pixel-art",
];

/// 32-bit string hash: `hash = hash * 31 + code_unit` over UTF-16 code units,
/// wrapping in signed 32-bit arithmetic.
pub fn string_hash(id: &str) -> i32 {
    id.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Index into [`AVATAR_VARIANTS`] for an id. Empty ids map to 0.
pub fn avatar_index(id: &str) -> usize {
    if id.is_empty() {
        return 0;
    }
    // unsigned_abs keeps i32::MIN at 2^31 instead of overflowing.
    (string_hash(id).unsigned_abs() % AVATAR_VARIANTS.len() as u32) as usize
}

/// Avatar style for a student id.
pub fn avatar_variant(id: &str) -> &'static str {
    AVATAR_VARIANTS[avatar_index(id)]
}
