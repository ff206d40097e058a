//! Packed monomial exponents.
//!
//! Each exponent occupies a field of `bits` bits. Fields are packed `64 / bits` to a word,
//! lowest variable first, and a monomial takes `words_per_exp(bits, nvars)` words.

/// Smallest field width used for packing.
pub const MIN_BITS: u32 = 8;

/// Smallest supported field width able to hold `max_exp`.
pub fn bits_for(max_exp: u64) -> u32 {
    [MIN_BITS, 16, 32]
        .into_iter()
        .find(|&bits| max_exp < 1u64 << bits)
        .unwrap_or(64)
}

pub fn fields_per_word(bits: u32) -> usize {
    (64 / bits) as usize
}

/// Number of 64-bit words needed to store one monomial.
pub fn words_per_exp(bits: u32, nvars: usize) -> usize {
    nvars.div_ceil(fields_per_word(bits))
}

fn field_mask(bits: u32) -> u64 {
    if bits == 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Appends the packed form of `exps` to `out`.
///
/// Every exponent must fit in `bits` bits.
pub fn pack(exps: &[u64], bits: u32, out: &mut Vec<u64>) {
    let per_word = fields_per_word(bits);
    for chunk in exps.chunks(per_word) {
        let word = chunk
            .iter()
            .enumerate()
            .fold(0u64, |acc, (k, &e)| acc | (e << (k as u32 * bits)));
        out.push(word);
    }
}

/// Unpacks one monomial of `nvars` exponents from `words`.
pub fn unpack(words: &[u64], bits: u32, nvars: usize) -> Vec<u64> {
    let per_word = fields_per_word(bits);
    let mask = field_mask(bits);
    (0..nvars)
        .map(|v| (words[v / per_word] >> ((v % per_word) as u32 * bits)) & mask)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_for() {
        assert_eq!(bits_for(0), 8);
        assert_eq!(bits_for(255), 8);
        assert_eq!(bits_for(256), 16);
        assert_eq!(bits_for(70_000), 32);
        assert_eq!(bits_for(u64::MAX), 64);
    }

    #[test]
    fn test_words_per_exp() {
        assert_eq!(words_per_exp(8, 2), 1);
        assert_eq!(words_per_exp(8, 9), 2);
        assert_eq!(words_per_exp(64, 3), 3);
        assert_eq!(words_per_exp(16, 0), 0);
    }

    #[test]
    fn test_pack_layout() {
        let mut words = Vec::new();
        pack(&[2, 0, 1], 16, &mut words);
        assert_eq!(words, vec![2u64 | (1u64 << 32)]);
        assert_eq!(unpack(&words, 16, 3), vec![2, 0, 1]);

        let mut wide = Vec::new();
        pack(&[u64::MAX, 5], 64, &mut wide);
        assert_eq!(wide, vec![u64::MAX, 5]);
        assert_eq!(unpack(&wide, 64, 2), vec![u64::MAX, 5]);
    }
}
