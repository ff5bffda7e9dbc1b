//! Pseudonymous identity derivation.
//!
//! Posters are labeled with a stable numeric id computed from their network
//! address instead of an authenticated account. The mapping is one-way and
//! collision-tolerant: two addresses hashing to the same id is accepted as a
//! usability trade-off, not a correctness bug.

use sha2::{Digest, Sha256};

/// Derives a stable decimal pseudonym from a raw client address string.
///
/// IPv4-mapped IPv6 addresses (`::ffff:1.2.3.4`) are normalized to their
/// IPv4 form first so the same host gets the same id regardless of which
/// socket family the connection arrived on. The first 4 bytes of the
/// SHA-256 digest are read as a big-endian u32 and rendered in decimal.
///
/// Total over all string inputs; the empty string yields a fixed id.
pub fn pseudonym_id(addr: &str) -> String {
    let clean = addr.strip_prefix("::ffff:").unwrap_or(addr);
    let digest = Sha256::digest(clean.as_bytes());
    let fragment = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    fragment.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        assert_eq!(pseudonym_id("192.168.1.1"), pseudonym_id("192.168.1.1"));
    }

    #[test]
    fn test_known_vectors() {
        // SHA-256 prefixes are fixed; these must never change across releases
        // or every poster's displayed identity shifts.
        assert_eq!(pseudonym_id("127.0.0.1"), "315234228");
        assert_eq!(pseudonym_id("0.0.0.0"), "434332245");
        assert_eq!(pseudonym_id("192.168.1.1"), "3320535628");
    }

    #[test]
    fn test_ipv4_mapped_prefix_stripped() {
        assert_eq!(pseudonym_id("::ffff:127.0.0.1"), pseudonym_id("127.0.0.1"));
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert_eq!(pseudonym_id(""), "3820012610");
    }

    #[test]
    fn test_distinct_addresses_differ() {
        assert_ne!(pseudonym_id("10.0.0.1"), pseudonym_id("10.0.0.2"));
    }

    #[test]
    fn test_output_parses_as_u32() {
        let id = pseudonym_id("203.0.113.7");
        assert!(id.parse::<u32>().is_ok());
    }
}
