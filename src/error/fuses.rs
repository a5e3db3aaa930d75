use crate::utils::fuses::{FuseScope, NamedFuse};

/// Errors returned when encoding fuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FuseError {
    /// A raw fuse number was outside of the encodable range.
    #[error("fuse value {value} is out of range, expected {minimum} <= value <= {maximum}")]
    OutOfRange {
        /// The rejected value.
        value: u64,
        /// Smallest accepted value.
        minimum: u64,
        /// Largest accepted value.
        maximum: u64,
    },
    /// A named fuse was requested in a scope it does not belong to.
    #[error("fuse {fuse} can not be set with the {scope} restriction")]
    RestrictionNotAllowed {
        /// The offending fuse.
        fuse: NamedFuse,
        /// The requested scope.
        scope: FuseScope,
    },
    /// A raw fuse number carries bits that belong to the other scope.
    #[error("fuse value {value:#x} sets bits outside of the {scope} range")]
    BitsOutsideScope {
        /// The rejected value.
        value: u64,
        /// The requested scope.
        scope: FuseScope,
    },
    /// A named fuse that only the contract can burn was requested.
    #[error("fuse {0} is not user settable")]
    NotUserSettable(NamedFuse),
    /// A named fuse's bit was passed in the unnamed list.
    #[error("{value:#x} is the named fuse {fuse}, pass it by name")]
    NamedFuseInUnnamedList {
        /// The raw bit.
        value: u32,
        /// The fuse that owns this bit.
        fuse: NamedFuse,
    },
    /// An unnamed fuse value is not a single bit of the scope's unnamed range.
    #[error("{value:#x} is not a valid unnamed {scope} fuse")]
    InvalidUnnamedFuse {
        /// The rejected value.
        value: u32,
        /// The requested scope.
        scope: FuseScope,
    },
}
