use crate::constants::MAX_WIRE_LABEL_LENGTH;

/// Errors returned by the DNS wire name codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireNameError {
    /// A dotted name contained an empty label, e.g. `a..eth`.
    #[error("name {0:?} contains an empty label")]
    EmptyLabel(String),
    /// A label exceeded the wire format limit on a path that does not substitute labelhashes.
    #[error("label of {0} bytes exceeds the {max} byte wire limit", max = MAX_WIRE_LABEL_LENGTH)]
    LabelTooLong(usize),
    /// A length byte points past the end of the buffer, or the terminator is missing.
    #[error("malformed wire name at offset {offset}")]
    MalformedWireName {
        /// Offset of the offending length byte.
        offset: usize,
    },
    /// A decoded label is not valid UTF-8.
    #[error("wire label at offset {offset} is not valid utf-8")]
    InvalidUtf8 {
        /// Offset of the label's length byte.
        offset: usize,
    },
}
