use crate::Base32Error;

/// Number of bytes in a raw identifier value.
pub const RAW_LEN: usize = 16;

/// Number of characters in an encoded suffix: `ceil(128 / 5)`.
pub const SUFFIX_LEN: usize = (RAW_LEN * 8).div_ceil(BITS_PER_CHAR);

/// A 128-bit value as 16 big-endian bytes.
pub type RawValue = [u8; RAW_LEN];

/// Lowercase base32 alphabet without `i`, `l`, `o`, `u`.
///
/// Symbols are in ascending ASCII order, so comparing two encoded suffixes
/// as strings gives the same answer as comparing the values they encode.
pub const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;
const MASK: u16 = 0x1F;

/// Padding bits prepended to the 128-bit value: `26 * 5 - 128`.
const PAD_BITS: usize = SUFFIX_LEN * BITS_PER_CHAR - RAW_LEN * 8;

/// Largest value the leading character may carry when the padding bits are
/// zero.
const MAX_LEADING: u8 = (1 << (BITS_PER_CHAR - PAD_BITS)) - 1;

/// Lookup table for decoding. Only the exact lowercase alphabet is accepted:
/// no uppercase, no Crockford aliases.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 32 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Encodes `bytes` into `buf`, most significant 5-bit group first.
///
/// The 128 input bits are left-padded with 2 zero bits to fill the 130 bits
/// of output, so the first character is always in `0`..=`7`.
pub fn encode_to_buf(bytes: &RawValue, buf: &mut [u8; SUFFIX_LEN]) {
    let mut bits = PAD_BITS;
    let mut acc = 0_u16;

    let mut out = 0;
    for &b in bytes {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            // `(acc >> bits) & MASK` is always in 0..=31
            buf[out] = ALPHABET[((acc >> bits) & MASK) as usize];
            out += 1;
        }
    }
    debug_assert_eq!(out, SUFFIX_LEN, "encoder must fill the whole buffer");
}

/// Encodes `bytes` into a 26-character suffix.
///
/// # Example
///
/// ```
/// let bytes = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
/// assert_eq!(typeid::encode(&bytes), "00041061050r3gg28a1c60t3gf");
/// ```
#[must_use]
pub fn encode(bytes: &RawValue) -> String {
    let mut buf = [0_u8; SUFFIX_LEN];
    encode_to_buf(bytes, &mut buf);
    buf.iter().map(|&b| char::from(b)).collect()
}

/// Decodes a 26-character suffix back into its 16 raw bytes.
///
/// # Errors
///
/// - [`Base32Error::InvalidLength`] if `encoded` is not 26 bytes long
/// - [`Base32Error::InvalidCharacter`] for the first byte outside
///   [`ALPHABET`]
/// - [`Base32Error::Overflow`] if the first character is above `7`, meaning
///   the value needs more than 128 bits
///
/// # Example
///
/// ```
/// use typeid::{Base32Error, decode};
///
/// let bytes = decode("00041061050r3gg28a1c60t3gf").unwrap();
/// assert_eq!(bytes, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
///
/// assert_eq!(decode("8zzzzzzzzzzzzzzzzzzzzzzzzz"), Err(Base32Error::Overflow));
/// ```
pub fn decode(encoded: &str) -> Result<RawValue, Base32Error> {
    let input = encoded.as_bytes();
    if input.len() != SUFFIX_LEN {
        return Err(Base32Error::InvalidLength { len: input.len() });
    }

    let mut acc = 0_u128;
    for (index, &byte) in input.iter().enumerate() {
        let val = LOOKUP[byte as usize];
        if val == NO_VALUE {
            return Err(Base32Error::InvalidCharacter { byte, index });
        }
        // The padding bits of the leading character fall off the top of the
        // u128 here; they are checked below.
        acc = (acc << BITS_PER_CHAR) | u128::from(val);
    }

    if LOOKUP[input[0] as usize] > MAX_LEADING {
        return Err(Base32Error::Overflow);
    }

    Ok(acc.to_be_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(val: u128) {
        let bytes = val.to_be_bytes();
        let encoded = encode(&bytes);
        assert_eq!(encoded.len(), SUFFIX_LEN);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(bytes, decoded, "roundtrip for u128: input={val}, b32={encoded}");
        assert_eq!(encode(&decoded), encoded);
    }

    #[test]
    fn layout_constants() {
        assert_eq!(SUFFIX_LEN, 26);
        assert_eq!(PAD_BITS, 2);
        assert_eq!(MAX_LEADING, 7);
    }

    #[test]
    fn encode_decode_preserves_u128_values() {
        for &v in &[
            0,
            1,
            u128::MAX,
            42,
            0xFFFF_0000_FFFF_0000_FFFF_0000_FFFF_0000,
            0x0123_4567_89AB_CDEF_0123_4567_89AB_CDEF,
            0x0188_9C89_DF6B_7F1C_A388_9139_6EC3_14BC,
        ] {
            roundtrip(v);
        }
    }

    #[test]
    fn known_vectors() {
        let counting: RawValue = core::array::from_fn(|i| i as u8);
        assert_eq!(encode(&counting), "00041061050r3gg28a1c60t3gf");
        assert_eq!(encode(&[0; RAW_LEN]), "00000000000000000000000000");
        assert_eq!(encode(&1_u128.to_be_bytes()), "00000000000000000000000001");
        assert_eq!(encode(&u128::MAX.to_be_bytes()), "7zzzzzzzzzzzzzzzzzzzzzzzzz");
        assert_eq!(
            encode(&0x0188_9C89_DF6B_7F1C_A388_9139_6EC3_14BC_u128.to_be_bytes()),
            "01h2e8kqvbfwea724h75qc655w"
        );
    }

    #[test]
    fn encoded_order_matches_byte_order() {
        let values = [
            0_u128,
            1,
            31,
            32,
            0xFFFF,
            1 << 64,
            (1 << 127) - 1,
            1 << 127,
            u128::MAX,
        ];
        for pair in values.windows(2) {
            let (a, b) = (pair[0].to_be_bytes(), pair[1].to_be_bytes());
            assert!(a < b);
            assert!(encode(&a) < encode(&b), "{:?} !< {:?}", encode(&a), encode(&b));
        }
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(decode(""), Err(Base32Error::InvalidLength { len: 0 }));
        assert_eq!(
            decode("0123456789012345678901234"),
            Err(Base32Error::InvalidLength { len: 25 })
        );
        assert_eq!(
            decode("012345678901234567890123456"),
            Err(Base32Error::InvalidLength { len: 27 })
        );
    }

    #[test]
    fn decode_rejects_characters_outside_alphabet() {
        assert_eq!(
            decode("000000000000@0000000000000"),
            Err(Base32Error::InvalidCharacter {
                byte: b'@',
                index: 12,
            })
        );
        for excluded in [b'i', b'l', b'o', b'u', b'A', b'Z'] {
            let mut buf = [b'0'; SUFFIX_LEN];
            buf[25] = excluded;
            let s = core::str::from_utf8(&buf).unwrap();
            assert_eq!(
                decode(s),
                Err(Base32Error::InvalidCharacter {
                    byte: excluded,
                    index: 25,
                }),
                "{} must be rejected",
                excluded as char
            );
        }
    }

    #[test]
    fn decode_rejects_values_wider_than_128_bits() {
        assert_eq!(decode("7zzzzzzzzzzzzzzzzzzzzzzzzz"), Ok([0xFF; RAW_LEN]));
        for leading in b"89abcdefghjkmnpqrstvwxyz" {
            let mut buf = [b'0'; SUFFIX_LEN];
            buf[0] = *leading;
            let s = core::str::from_utf8(&buf).unwrap();
            assert_eq!(decode(s), Err(Base32Error::Overflow), "leading {}", *leading as char);
        }
    }

    #[test]
    fn decode_reports_bad_characters_before_overflow() {
        assert_eq!(
            decode("zzzzzzzzzzzzzzzzzzzzzzzzz!"),
            Err(Base32Error::InvalidCharacter {
                byte: b'!',
                index: 25,
            })
        );
    }
}
