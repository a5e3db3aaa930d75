use alloy::primitives::Address;
use core::fmt;

/// A single gateway that did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayFailure {
    /// The request URL after placeholder substitution.
    pub url: String,
    /// Why the gateway was skipped.
    pub reason: String,
}

impl fmt::Display for GatewayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.url, self.reason)
    }
}

/// Errors returned by the CCIP-Read (EIP-3668) flow.
#[derive(Debug, thiserror::Error)]
pub enum CcipError {
    /// The revert payload could not be decoded as `OffchainLookup`.
    #[error("malformed OffchainLookup revert: {0}")]
    MalformedLookup(#[source] alloy::sol_types::Error),
    /// The lookup's sender is not the contract that was called.
    #[error("OffchainLookup sender {sender} does not match call target {to}")]
    SenderMismatch {
        /// The sender reported in the revert payload.
        sender: Address,
        /// The contract that was called.
        to: Address,
    },
    /// The lookup did not list any gateway URL.
    #[error("OffchainLookup provided no gateway urls")]
    NoGateways,
    /// A gateway answered with a 4xx status. No further gateways are tried.
    #[error("gateway {url} rejected the request with status {status}: {message}")]
    GatewayRejected {
        /// The request URL.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// The response body, if any.
        message: String,
    },
    /// Every gateway was unavailable or returned an unusable response.
    #[error("all {} gateways failed: {}", .0.len(), DisplayFailures(.0))]
    GatewaysExhausted(Vec<GatewayFailure>),
    /// Chained lookups exceeded the configured limit.
    #[error("exceeded {0} chained OffchainLookup redirects")]
    TooManyRedirects(usize),
    /// The HTTP request could not be sent.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

struct DisplayFailures<'a>(&'a [GatewayFailure]);

impl fmt::Display for DisplayFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}
