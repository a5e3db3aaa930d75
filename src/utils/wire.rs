//! DNS wire format names.
//!
//! Resolver contracts take names as a sequence of `[length][label bytes]` entries terminated by a
//! zero length label.

use super::labels::{encode_labelhash, labelhash, trim_name};
use crate::{constants::MAX_WIRE_LABEL_LENGTH, error::WireNameError};
use alloy::primitives::{Bytes, keccak256};

/// Encodes a dotted name into the DNS wire format.
///
/// Labels longer than 255 bytes are replaced by their bracketed labelhash, which resolvers accept
/// as a placeholder for a label that can not be carried on the wire.
pub fn name_to_wire(name: &str) -> Result<Bytes, WireNameError> {
    encode(name, true)
}

/// Encodes a dotted name into the DNS wire format, rejecting oversized labels.
pub fn name_to_wire_strict(name: &str) -> Result<Bytes, WireNameError> {
    encode(name, false)
}

fn encode(name: &str, substitute_oversized: bool) -> Result<Bytes, WireNameError> {
    let trimmed = trim_name(name);
    if trimmed.is_empty() {
        return Ok(Bytes::from_static(&[0]));
    }

    let mut out = Vec::with_capacity(trimmed.len() + 2);
    for label in trimmed.split('.') {
        if label.is_empty() {
            return Err(WireNameError::EmptyLabel(name.to_string()));
        }

        if label.len() <= MAX_WIRE_LABEL_LENGTH {
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        } else if substitute_oversized {
            let placeholder = encode_labelhash(keccak256(label.as_bytes()));
            out.push(placeholder.len() as u8);
            out.extend_from_slice(placeholder.as_bytes());
        } else {
            return Err(WireNameError::LabelTooLong(label.len()));
        }
    }
    out.push(0);
    Ok(out.into())
}

/// Decodes a DNS wire format name into its dotted form.
///
/// Decoding stops at the first zero length label, trailing bytes are ignored. A name whose last two
/// labels are both `eth` has the duplicate dropped; this only undoes re-encoding of names that
/// were already suffixed and is not a general DNS rule.
pub fn wire_to_name(bytes: &[u8]) -> Result<String, WireNameError> {
    let mut labels = Vec::new();
    let mut offset = 0;

    loop {
        let Some(&len) = bytes.get(offset) else {
            return Err(WireNameError::MalformedWireName { offset });
        };
        if len == 0 {
            break;
        }

        let start = offset + 1;
        let end = start + len as usize;
        let raw = bytes.get(start..end).ok_or(WireNameError::MalformedWireName { offset })?;
        let label =
            std::str::from_utf8(raw).map_err(|_| WireNameError::InvalidUtf8 { offset })?;
        labels.push(label);
        offset = end;
    }

    if matches!(labels.as_slice(), [.., second_last, last] if is_eth(second_last) && is_eth(last)) {
        labels.pop();
    }

    Ok(labels.join("."))
}

fn is_eth(label: &str) -> bool {
    label == "eth" || (label.starts_with('[') && labelhash(label) == labelhash("eth"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::hex;

    #[test]
    fn encodes_simple_name() {
        let wire = name_to_wire("a.b.eth").unwrap();
        assert_eq!(&wire[..], &hex!("016101620365746800"));
        assert_eq!(wire_to_name(&wire).unwrap(), "a.b.eth");
    }

    #[test]
    fn empty_name_is_terminator() {
        assert_eq!(&name_to_wire("").unwrap()[..], &[0u8]);
        assert_eq!(&name_to_wire(".").unwrap()[..], &[0u8]);
        assert_eq!(wire_to_name(&[0]).unwrap(), "");
    }

    #[test]
    fn strips_leading_and_trailing_dots() {
        assert_eq!(name_to_wire(".nick.eth.").unwrap(), name_to_wire("nick.eth").unwrap());
    }

    #[test]
    fn rejects_empty_interior_label() {
        assert_eq!(
            name_to_wire("a..eth"),
            Err(WireNameError::EmptyLabel("a..eth".to_string()))
        );
    }

    #[test]
    fn round_trips_unicode_and_max_length_labels() {
        let longest = format!("{}.eth", "a".repeat(255));
        for name in ["xn--ls8h.eth", "🍕.eth", "sub.deep.name.eth", longest.as_str()] {
            let wire = name_to_wire(name).unwrap();
            assert_eq!(wire_to_name(&wire).unwrap(), name);
        }
    }

    #[test]
    fn oversized_label_is_substituted_deterministically() {
        let long = "a".repeat(256);
        let name = format!("{long}.eth");

        let first = name_to_wire(&name).unwrap();
        let second = name_to_wire(&name).unwrap();
        assert_eq!(first, second);

        let expected = encode_labelhash(keccak256(long.as_bytes()));
        assert_eq!(first[0], 66);
        assert_eq!(&first[1..67], expected.as_bytes());
        assert_eq!(wire_to_name(&first).unwrap(), format!("{expected}.eth"));
    }

    #[test]
    fn strict_encoding_rejects_oversized_label() {
        let name = format!("{}.eth", "a".repeat(256));
        assert_eq!(name_to_wire_strict(&name), Err(WireNameError::LabelTooLong(256)));
        assert!(name_to_wire_strict("nick.eth").is_ok());
    }

    #[test]
    fn truncated_input_is_malformed() {
        // length byte claims 5 bytes but only 3 follow
        assert_eq!(
            wire_to_name(&hex!("05616263")),
            Err(WireNameError::MalformedWireName { offset: 0 })
        );
        // missing terminator
        assert_eq!(
            wire_to_name(&hex!("03657468")),
            Err(WireNameError::MalformedWireName { offset: 4 })
        );
        assert_eq!(wire_to_name(&[]), Err(WireNameError::MalformedWireName { offset: 0 }));
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert_eq!(wire_to_name(&hex!("01ff00")), Err(WireNameError::InvalidUtf8 { offset: 0 }));
    }

    #[test]
    fn ignores_bytes_after_terminator() {
        assert_eq!(wire_to_name(&hex!("0365746800ffff")).unwrap(), "eth");
    }

    #[test]
    fn collapses_duplicate_eth_suffix() {
        let wire = hex!("046e69636b036574680365746800");
        assert_eq!(wire_to_name(&wire).unwrap(), "nick.eth");

        let hashed = encode_labelhash(labelhash("eth"));
        let name = format!("nick.eth.{hashed}");
        assert_eq!(wire_to_name(&name_to_wire(&name).unwrap()).unwrap(), "nick.eth");

        // only the trailing pair is affected
        let wire = name_to_wire("eth.nick.eth").unwrap();
        assert_eq!(wire_to_name(&wire).unwrap(), "eth.nick.eth");
    }
}
