//! The request/response combinator.
//!
//! Every read operation is defined once, as a pair of pure functions: one that encodes the request
//! and one that decodes the response. From that pair [`EnsFunction`] derives the single-shot
//! caller ([`EnsFunction::call`]) and the batchable descriptor ([`EnsFunction::batch`]), so leaf
//! operations compose into a multicall without knowing about batching.

use crate::{
    ccip::GatewayFetcher,
    client::{CallTransport, EnsClient},
    config::EnsConfig,
    error::EnsError,
    types::{CallResult, CallWithPassthrough},
};
use std::future::Future;

/// A read operation described by an encoder and a decoder.
pub trait EnsFunction: Sized {
    /// Arguments of the operation.
    type Args: Send + Sync;
    /// Context the encoder hands to the decoder.
    type Passthrough: Send;
    /// The decoded result.
    type Output;

    /// Encodes the request.
    fn encode(
        config: &EnsConfig,
        args: &Self::Args,
    ) -> Result<CallWithPassthrough<Self::Passthrough>, EnsError>;

    /// Decodes a response.
    ///
    /// `response` may be a failed call; the decoder decides whether that is "no record" or an
    /// error. Empty successful responses never reach the decoder.
    fn decode(
        config: &EnsConfig,
        response: CallResult,
        passthrough: Self::Passthrough,
        args: &Self::Args,
    ) -> Result<Option<Self::Output>, EnsError>;

    /// Decodes a response, mapping an empty successful response to `None`.
    fn decode_response(
        config: &EnsConfig,
        response: CallResult,
        passthrough: Self::Passthrough,
        args: &Self::Args,
    ) -> Result<Option<Self::Output>, EnsError> {
        if response.is_empty_success() {
            return Ok(None);
        }
        Self::decode(config, response, passthrough, args)
    }

    /// Encodes, performs a single call and decodes the response.
    fn call<T, G>(
        client: &EnsClient<T, G>,
        args: Self::Args,
    ) -> impl Future<Output = Result<Option<Self::Output>, EnsError>> + Send
    where
        T: CallTransport,
        G: GatewayFetcher,
    {
        async move {
            let request = Self::encode(client.config(), &args)?;
            let response = client.call(&request.call).await?;
            Self::decode_response(client.config(), response, request.passthrough, &args)
        }
    }

    /// Returns a descriptor of this operation for [`batch`](crate::batch::batch). Nothing is
    /// executed.
    fn batch(args: Self::Args) -> BatchItem<Self> {
        BatchItem::new(args)
    }
}

/// A reified, not yet executed [`EnsFunction`] call.
#[derive(Debug, Clone)]
pub struct BatchItem<F: EnsFunction> {
    args: F::Args,
}

impl<F: EnsFunction> BatchItem<F> {
    /// Creates a new item.
    pub const fn new(args: F::Args) -> Self {
        Self { args }
    }

    /// Returns the arguments.
    pub const fn args(&self) -> &F::Args {
        &self.args
    }

    /// Encodes the item's request.
    pub fn encode(&self, config: &EnsConfig) -> Result<CallWithPassthrough<F::Passthrough>, EnsError> {
        F::encode(config, &self.args)
    }

    /// Decodes the item's slot of a multicall.
    pub fn decode(
        &self,
        config: &EnsConfig,
        response: CallResult,
        passthrough: F::Passthrough,
    ) -> Result<Option<F::Output>, EnsError> {
        F::decode_response(config, response, passthrough, &self.args)
    }
}
