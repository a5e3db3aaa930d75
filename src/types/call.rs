//! Call descriptors exchanged between encoders, the multicall engine and decoders.

use alloy::primitives::{Address, Bytes};

/// An opaque, contract-addressed request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedCall {
    /// The contract to call.
    pub to: Address,
    /// The calldata.
    pub data: Bytes,
}

impl EncodedCall {
    /// Creates a new [`EncodedCall`].
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self { to, data: data.into() }
    }
}

/// An [`EncodedCall`] together with context that the decoder needs but the response does not
/// carry.
///
/// The passthrough is opaque to everything between the encoder and the decoder, it is only
/// forwarded. Calls without context use `()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallWithPassthrough<P = ()> {
    /// The request.
    pub call: EncodedCall,
    /// Context forwarded to the decoder.
    pub passthrough: P,
}

impl CallWithPassthrough<()> {
    /// Wraps a call that has no decode context.
    pub fn new(call: EncodedCall) -> Self {
        Self { call, passthrough: () }
    }
}

impl<P> CallWithPassthrough<P> {
    /// Wraps a call with decode context.
    pub fn with_passthrough(call: EncodedCall, passthrough: P) -> Self {
        Self { call, passthrough }
    }
}

/// The outcome of a single call, either direct or as one slot of a multicall.
///
/// When `success` is `false`, `return_data` holds the revert payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallResult {
    /// Whether the call succeeded.
    pub success: bool,
    /// Return data, or the revert payload on failure.
    pub return_data: Bytes,
}

impl CallResult {
    /// A successful call returning `data`.
    pub fn success(data: impl Into<Bytes>) -> Self {
        Self { success: true, return_data: data.into() }
    }

    /// A reverted call with revert payload `data`.
    pub fn failure(data: impl Into<Bytes>) -> Self {
        Self { success: false, return_data: data.into() }
    }

    /// Returns `true` for a successful call that returned nothing.
    ///
    /// This is the "no record" signal, not an error.
    pub fn is_empty_success(&self) -> bool {
        self.success && self.return_data.is_empty()
    }
}
