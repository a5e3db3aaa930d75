//! Client error types.
use alloy::{primitives::Bytes, transports::TransportError};
use thiserror::Error;

mod ccip;
pub use ccip::{CcipError, GatewayFailure};

mod fuses;
pub use fuses::FuseError;

mod resolution;
pub use resolution::ResolutionError;

mod wire;
pub use wire::WireNameError;

/// The overarching error type returned by every client operation.
#[derive(Debug, Error)]
pub enum EnsError {
    /// Errors related to the DNS wire name codec.
    #[error(transparent)]
    WireName(#[from] WireNameError),
    /// Errors related to fuse encoding.
    #[error(transparent)]
    Fuse(#[from] FuseError),
    /// Errors related to the CCIP-Read protocol.
    #[error(transparent)]
    Ccip(#[from] CcipError),
    /// Errors returned by the universal resolver.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    /// The call reverted with data that no decoder understood.
    #[error("call reverted: {0}")]
    Reverted(Bytes),
    /// The multicall returned a different number of results than calls were sent.
    #[error("expected {expected} multicall results, got {actual}")]
    UnexpectedResultCount {
        /// Number of calls in the batch.
        expected: usize,
        /// Number of results returned.
        actual: usize,
    },
    /// An error occurred during ABI encoding/decoding.
    #[error(transparent)]
    AbiError(#[from] alloy::sol_types::Error),
    /// An error occurred talking to RPC.
    #[error(transparent)]
    RpcError(#[from] TransportError),
    /// An internal error occurred.
    #[error(transparent)]
    InternalError(#[from] eyre::Error),
}

impl EnsError {
    /// Returns `true` if the error is a protocol error from the CCIP-Read flow.
    pub fn is_ccip(&self) -> bool {
        matches!(self, Self::Ccip(_))
    }
}
