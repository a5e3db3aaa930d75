//! Label and node hashing.

use alloy::primitives::{B256, hex, keccak256};

/// Returns the keccak-256 labelhash of a single label.
///
/// A label already in `[<64 hex chars>]` form is taken to be its own labelhash.
pub fn labelhash(label: &str) -> B256 {
    if label.is_empty() {
        return B256::ZERO;
    }
    decode_labelhash(label).unwrap_or_else(|| keccak256(label.as_bytes()))
}

/// Strips a single leading and a single trailing dot from `name`.
pub(crate) fn trim_name(name: &str) -> &str {
    let name = name.strip_prefix('.').unwrap_or(name);
    name.strip_suffix('.').unwrap_or(name)
}

/// Computes the ENSIP-1 namehash of a dotted name.
///
/// The name is trimmed like the wire encoding trims it, so both describe the same node.
pub fn namehash(name: &str) -> B256 {
    let name = trim_name(name);
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }

    let mut buf = [0u8; 64];
    for label in name.rsplit('.') {
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(labelhash(label).as_slice());
        node = keccak256(buf);
    }
    node
}

/// Formats a labelhash as a bracketed placeholder label.
pub fn encode_labelhash(hash: B256) -> String {
    format!("[{}]", hex::encode(hash))
}

/// Parses a bracketed placeholder label back into its labelhash.
pub fn decode_labelhash(label: &str) -> Option<B256> {
    let inner = label.strip_prefix('[')?.strip_suffix(']')?;
    if inner.len() != 64 {
        return None;
    }
    let mut hash = B256::ZERO;
    hex::decode_to_slice(inner, &mut hash.0).ok()?;
    Some(hash)
}

/// Returns `true` if `label` is a bracketed placeholder label.
pub fn is_encoded_labelhash(label: &str) -> bool {
    decode_labelhash(label).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::b256;

    #[test]
    fn namehash_known_values() {
        assert_eq!(namehash(""), B256::ZERO);
        assert_eq!(
            namehash("eth"),
            b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(
            namehash("foo.eth"),
            b256!("de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
        );
    }

    #[test]
    fn namehash_ignores_outer_dots() {
        assert_eq!(namehash(".foo.eth."), namehash("foo.eth"));
        assert_eq!(namehash("foo.eth."), namehash("foo.eth"));
        assert_eq!(namehash("."), B256::ZERO);
    }

    #[test]
    fn labelhash_known_value() {
        assert_eq!(
            labelhash("eth"),
            b256!("4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0")
        );
        assert_eq!(labelhash(""), B256::ZERO);
    }

    #[test]
    fn encoded_labelhash_is_transparent_to_namehash() {
        let encoded = encode_labelhash(labelhash("foo"));
        assert_eq!(encoded.len(), 66);
        assert!(is_encoded_labelhash(&encoded));
        assert_eq!(namehash(&format!("{encoded}.eth")), namehash("foo.eth"));
    }

    #[test]
    fn decode_labelhash_rejects_malformed() {
        assert_eq!(decode_labelhash("foo"), None);
        assert_eq!(decode_labelhash("[abcd]"), None);
        assert_eq!(decode_labelhash(&format!("[{}]", "z".repeat(64))), None);
    }
}
