//! Content fingerprint type using BLAKE3

use std::fmt;

/// A 32-byte BLAKE3 digest identifying a canonical form
///
/// Fingerprints are derived from content only, so they are stable across
/// processes and platforms. The byte order doubles as an arbitrary but
/// deterministic total order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint arbitrary data
    pub fn digest(data: &[u8]) -> Self {
        let hash = blake3::hash(data);
        Fingerprint(*hash.as_bytes())
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short prefix for display (first 7 chars)
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_digest() {
        let f1 = Fingerprint::digest(b"hello");
        let f2 = Fingerprint::digest(b"hello");
        let f3 = Fingerprint::digest(b"world");

        assert_eq!(f1, f2);
        assert_ne!(f1, f3);
    }

    #[test]
    fn test_fingerprint_hex() {
        let f = Fingerprint::digest(b"test data");
        let hex = f.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(f.to_string(), hex);
        assert!(hex.starts_with(&f.short()));
        assert_eq!(format!("{:?}", f), format!("Fingerprint({})", f.short()));
    }

    #[test]
    fn test_fingerprint_ordering_follows_hex() {
        let a = Fingerprint::digest(b"a");
        let b = Fingerprint::digest(b"b");
        assert_ne!(a, b);
        assert_eq!(a.cmp(&b), a.to_hex().cmp(&b.to_hex()));
    }
}
