use smol_str::SmolStr;

/// Width of every generated short code.
pub const CODE_LENGTH: usize = 8;

/// The 62-symbol alphabet, ordered so that a symbol's index is its digit
/// value.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE: u64 = ALPHABET.len() as u64;

/// Encodes an ID as a fixed-width base-62 string.
///
/// Remainders of repeated division by 62 become symbols, most significant
/// first. Values shorter than [`CODE_LENGTH`] digits are left-padded with
/// the zero symbol; values longer than [`CODE_LENGTH`] digits keep only the
/// least-significant digits. The mapping is deterministic but not required
/// to be invertible: the link store, not the encoding, is the source of
/// truth for code-to-url associations.
pub fn encode(mut id: u64) -> SmolStr {
    let mut buf = [ALPHABET[0]; CODE_LENGTH];
    let mut pos = CODE_LENGTH;
    while id > 0 && pos > 0 {
        pos -= 1;
        buf[pos] = ALPHABET[(id % BASE) as usize];
        id /= BASE;
    }
    SmolStr::new(std::str::from_utf8(&buf).expect("base62 alphabet is ascii"))
}

/// Whether `byte` is a symbol of the base-62 alphabet.
pub fn is_alphabet_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_encodes_as_all_zero_symbols() {
        assert_eq!(encode(0), "00000000");
    }

    #[test]
    fn small_values_are_left_padded() {
        assert_eq!(encode(1), "00000001");
        assert_eq!(encode(61), "0000000z");
        assert_eq!(encode(62), "00000010");
    }

    #[test]
    fn exact_width_value_is_unpadded() {
        // 62^7 is the smallest value with exactly eight base-62 digits.
        assert_eq!(encode(62_u64.pow(7)), "10000000");
    }

    #[test]
    fn oversize_values_keep_least_significant_digits() {
        // 62^8 has nine digits ("1" then eight zeros); the leading digit is
        // dropped.
        assert_eq!(encode(62_u64.pow(8)), "00000000");
        assert_eq!(encode(62_u64.pow(8) + 5), "00000005");
    }

    #[test]
    fn output_is_fixed_width_over_the_alphabet() {
        for id in [0, 1, 61, 62, 4096, 62_u64.pow(7), 62_u64.pow(8), u64::MAX] {
            let code = encode(id);
            assert_eq!(code.len(), CODE_LENGTH, "width for id {id}");
            assert!(
                code.bytes().all(is_alphabet_byte),
                "alphabet for id {id}: {code}"
            );
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(encode(123_456_789), encode(123_456_789));
    }
}
