/// Offset of Phred+33 quality encoding.
pub const PHRED_OFFSET: u8 = 33;

/// GC percentage (0..=100) of a sequence, case-insensitive. Empty sequences score 0.
pub fn gc_percent(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc = seq
        .iter()
        .filter(|&&b| matches!(b, b'G' | b'C' | b'g' | b'c'))
        .count();
    100.0 * gc as f64 / seq.len() as f64
}

/// Decoded Phred score of one quality character.
#[inline]
pub fn phred(q: u8) -> i32 {
    q as i32 - PHRED_OFFSET as i32
}

/// Arithmetic mean of decoded quality scores. Empty strings score 0.
pub fn mean_quality(qual: &[u8]) -> f64 {
    if qual.is_empty() {
        return 0.0;
    }
    let total: i64 = qual.iter().map(|&q| phred(q) as i64).sum();
    total as f64 / qual.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gc_counts_both_cases() {
        assert_eq!(gc_percent(b"GCGC"), 100.0);
        assert_eq!(gc_percent(b"gcAT"), 50.0);
        assert_eq!(gc_percent(b"ATTA"), 0.0);
        assert_eq!(gc_percent(b""), 0.0);
    }

    #[test]
    fn quality_mean_is_phred33() {
        // 'I' = 73 -> 40
        assert_eq!(mean_quality(b"IIII"), 40.0);
        assert_eq!(mean_quality(b"!!"), 0.0);
        assert_eq!(mean_quality(b"!I"), 20.0);
        assert_eq!(mean_quality(b""), 0.0);
    }
}
