//! Random token helpers
//!
//! Everything here produces placeholder secret material: tokens shaped like
//! keys and passwords, and RFC 4122 version-4 UUIDs. The values must never
//! collide across calls within a process lifetime, so the default source is
//! the OS CSPRNG even though nothing downstream treats them as real keys.

use rand::{Rng, RngCore};
use uuid::Uuid;

/// Length of a token shaped like a WireGuard key (44 base64 characters).
pub const PSEUDO_KEY_LEN: usize = 44;

/// Standard base64 alphabet, sampled uniformly with replacement.
const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Token of `len` characters drawn from the standard base64 alphabet.
pub fn alphabet_token<R: RngCore>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| BASE64_ALPHABET[rng.gen_range(0..BASE64_ALPHABET.len())] as char)
        .collect()
}

/// 44-character token with the shape of a WireGuard key. No key math is
/// involved; a "private" and "public" key from consecutive calls are
/// unrelated.
pub fn pseudo_key<R: RngCore>(rng: &mut R) -> String {
    alphabet_token(rng, PSEUDO_KEY_LEN)
}

/// Version-4 UUID built from 16 bytes of the caller's RNG. `uuid::Builder`
/// sets the version nibble to 4 and constrains the variant nibble to
/// {8, 9, a, b}.
pub fn uuid_v4<R: RngCore>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use rand::SeedableRng;
    use regex::Regex;

    #[test]
    fn test_pseudo_key_length_and_charset() {
        let key = pseudo_key(&mut OsRng);
        assert_eq!(key.len(), 44);
        assert!(key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/'));
    }

    #[test]
    fn test_alphabet_token_lengths() {
        for len in [16, 32, 44] {
            let token = alphabet_token(&mut OsRng, len);
            assert_eq!(token.len(), len);
            assert!(token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/'));
        }
    }

    #[test]
    fn test_consecutive_keys_differ() {
        let a = pseudo_key(&mut OsRng);
        let b = pseudo_key(&mut OsRng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_uuid_v4_bit_contract() {
        let pattern = Regex::new(
            r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$",
        )
        .unwrap();
        for _ in 0..64 {
            let id = uuid_v4(&mut OsRng).to_string();
            assert!(pattern.is_match(&id), "bad uuid: {id}");
        }
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = rand::rngs::StdRng::seed_from_u64(7);
        let mut b = rand::rngs::StdRng::seed_from_u64(7);
        assert_eq!(pseudo_key(&mut a), pseudo_key(&mut b));
        assert_eq!(uuid_v4(&mut a), uuid_v4(&mut b));
    }

    #[test]
    fn test_uuids_do_not_repeat() {
        let a = uuid_v4(&mut OsRng);
        let b = uuid_v4(&mut OsRng);
        assert_ne!(a, b);
    }
}
