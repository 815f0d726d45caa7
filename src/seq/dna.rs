use lazy_static::lazy_static;

lazy_static! {
    pub static ref DNA_COMPLEMENT: [u8; 128] = complement_table(b"ACGT", b"TGCA");
    pub static ref RNA_COMPLEMENT: [u8; 128] = complement_table(b"ACGU", b"UGCA");
}

/// Builds an ASCII lookup table pairing `from[i]` with `to[i]` in both cases. Every other
/// byte maps to itself.
fn complement_table(from: &[u8], to: &[u8]) -> [u8; 128] {
    let mut table = [0u8; 128];
    for (i, b) in table.iter_mut().enumerate() {
        *b = i as u8;
    }

    for (&a, &b) in from.iter().zip(to.iter()) {
        table[a as usize] = b;
        table[a.to_ascii_lowercase() as usize] = b.to_ascii_lowercase();
    }

    table
}

#[inline(always)]
pub fn complement(table: &[u8; 128], symbol: char) -> char {
    match symbol.is_ascii() {
        true => table[symbol as usize] as char,
        false => symbol,
    }
}

#[inline(always)]
pub fn is_gc(b: u8) -> bool {
    matches!(b, b'G' | b'C' | b'g' | b'c')
}

/// Percentage of G and C symbols in `seq`, counted case-insensitively.
///
/// Any other symbol (including ambiguity codes such as `N`) counts toward the length only.
/// Returns `None` for an empty slice, where the ratio is undefined.
pub fn gc_percent(seq: &[u8]) -> Option<f64> {
    if seq.is_empty() {
        return None;
    }

    let gc = seq.iter().filter(|b| is_gc(**b)).count();
    Some(100.0 * (gc as f64) / (seq.len() as f64))
}
