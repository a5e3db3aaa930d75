use alloy::primitives::Bytes;

/// Errors reported by the universal resolver.
///
/// These are only surfaced for strict lookups. Non-strict lookups treat them as "no record".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// No resolver is set for the name or any of its parents.
    #[error("no resolver found")]
    ResolverNotFound,
    /// The resolver found through a parent does not support wildcard resolution.
    #[error("resolver does not support wildcard resolution")]
    ResolverWildcardNotSupported,
    /// The resolver address has no code.
    #[error("resolver is not a contract")]
    ResolverNotContract,
    /// The resolver itself reverted.
    #[error("resolver reverted: {0}")]
    ResolverError(Bytes),
    /// One or more gateways queried by the universal resolver failed.
    #[error("universal resolver gateway error: {}", .0.join("; "))]
    HttpError(Vec<String>),
}
