use uuid::Uuid;

use crate::error::{PublicIdError, Result};

/// Encodes a UUID as a base62 string over the given alphabet.
///
/// The 128 bits are treated as one unsigned big integer, most-significant
/// digit first. The nil UUID maps to the alphabet's first character, never
/// to an empty string.
pub fn encode_uuid(uuid: Uuid, alphabet: &str) -> String {
    let digits: Vec<char> = alphabet.chars().collect();
    let base = digits.len() as u128;
    let mut value = uuid.as_u128();

    if value == 0 {
        return digits[0].to_string();
    }

    let mut encoded = Vec::new();
    while value > 0 {
        encoded.push(digits[(value % base) as usize]);
        value /= base;
    }
    encoded.reverse();
    encoded.into_iter().collect()
}

/// Decodes a base62 string back to a UUID.
///
/// Accumulates `value = value * 62 + index` left to right. Canonical UUIDs
/// with leading zero bytes round-trip exactly; the hyphenated rendering
/// comes from the `uuid` crate.
///
/// # Errors
///
/// Returns `MalformedInput` for an empty string, `InvalidCharacter` for any
/// character absent from the alphabet, and `Overflow` once the accumulated
/// value no longer fits in 128 bits (which bounds valid input to 22 base62
/// digits).
pub fn decode_uuid(input: &str, alphabet: &str) -> Result<Uuid> {
    if input.is_empty() {
        return Err(PublicIdError::MalformedInput {
            input: String::new(),
        });
    }

    let digits: Vec<char> = alphabet.chars().collect();
    let base = digits.len() as u128;
    let mut value: u128 = 0;

    for ch in input.chars() {
        let index = digits
            .iter()
            .position(|&d| d == ch)
            .ok_or(PublicIdError::InvalidCharacter { ch })? as u128;
        value = value
            .checked_mul(base)
            .and_then(|v| v.checked_add(index))
            .ok_or_else(|| PublicIdError::Overflow {
                input: input.to_string(),
            })?;
    }

    Ok(Uuid::from_u128(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE62_ALPHABET;
    use proptest::prelude::*;

    fn encode(uuid: Uuid) -> String {
        encode_uuid(uuid, DEFAULT_BASE62_ALPHABET)
    }

    fn decode(input: &str) -> Result<Uuid> {
        decode_uuid(input, DEFAULT_BASE62_ALPHABET)
    }

    // ========== Encoding ==========

    #[test]
    fn test_encode_nil_uuid_is_first_alphabet_char() {
        assert_eq!(encode(Uuid::nil()), "0");
    }

    #[test]
    fn test_encode_small_values() {
        assert_eq!(encode(Uuid::from_u128(1)), "1");
        assert_eq!(encode(Uuid::from_u128(61)), "z");
        assert_eq!(encode(Uuid::from_u128(62)), "10");
    }

    #[test]
    fn test_encode_max_uuid_is_22_digits() {
        assert_eq!(encode(Uuid::max()).len(), 22);
    }

    #[test]
    fn test_encode_shortens_canonical_form() {
        let uuid = Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);
        assert!(encode(uuid).len() < 36);
    }

    // ========== Decoding ==========

    #[test]
    fn test_decode_small_values() {
        assert_eq!(decode("0"), Ok(Uuid::nil()));
        assert_eq!(decode("10"), Ok(Uuid::from_u128(62)));
    }

    #[test]
    fn test_decode_leading_zero_digits_are_harmless() {
        assert_eq!(decode("001"), Ok(Uuid::from_u128(1)));
    }

    #[test]
    fn test_decode_empty_fails() {
        assert_eq!(
            decode(""),
            Err(PublicIdError::MalformedInput {
                input: String::new()
            })
        );
    }

    #[test]
    fn test_decode_invalid_character_fails() {
        assert_eq!(
            decode("abc!"),
            Err(PublicIdError::InvalidCharacter { ch: '!' })
        );
        assert_eq!(
            decode("a-b"),
            Err(PublicIdError::InvalidCharacter { ch: '-' })
        );
    }

    #[test]
    fn test_decode_overflow_fails() {
        // 22 top-valued digits exceed 2^128
        let too_big = "z".repeat(22);
        assert_eq!(
            decode(&too_big),
            Err(PublicIdError::Overflow { input: too_big })
        );
    }

    // ========== Round trips ==========

    #[test]
    fn test_roundtrip_boundary_uuids() {
        for uuid in [Uuid::nil(), Uuid::max()] {
            assert_eq!(decode(&encode(uuid)), Ok(uuid));
        }
    }

    #[test]
    fn test_roundtrip_leading_zero_bytes() {
        let uuid = Uuid::from_u128(0xdead_beef);
        let decoded = decode(&encode(uuid)).unwrap();
        assert_eq!(decoded, uuid);
        assert_eq!(
            decoded.to_string(),
            "00000000-0000-0000-0000-0000deadbeef"
        );
    }

    #[test]
    fn test_roundtrip_canonical_rendering() {
        let uuid = Uuid::parse_str("f81d4fae-7dec-11d0-a765-00a0c91e6bf6").unwrap();
        let decoded = decode(&encode(uuid)).unwrap();
        assert_eq!(decoded.to_string(), "f81d4fae-7dec-11d0-a765-00a0c91e6bf6");
    }

    #[test]
    fn test_custom_alphabet_roundtrip() {
        // Reversed default alphabet, still 62 distinct symbols
        let alphabet: String = DEFAULT_BASE62_ALPHABET.chars().rev().collect();
        let uuid = Uuid::from_u128(987_654_321);
        let encoded = encode_uuid(uuid, &alphabet);
        assert_ne!(encoded, encode(uuid));
        assert_eq!(decode_uuid(&encoded, &alphabet), Ok(uuid));
    }

    proptest! {
        #[test]
        fn prop_roundtrip_all_uuids(value in any::<u128>()) {
            let uuid = Uuid::from_u128(value);
            prop_assert_eq!(decode(&encode(uuid)), Ok(uuid));
        }

        #[test]
        fn prop_encoded_never_longer_than_22(value in any::<u128>()) {
            let encoded = encode(Uuid::from_u128(value));
            prop_assert!(!encoded.is_empty());
            prop_assert!(encoded.len() <= 22);
        }
    }
}
