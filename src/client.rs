//! The chain client and its transport seam.

use crate::{
    ccip::{self, GatewayFetcher},
    config::EnsConfig,
    error::{CcipError, EnsError},
    metrics,
    types::{CallResult, EncodedCall, OffchainLookup},
};
use alloy::{
    primitives::{Address, Bytes},
    providers::Provider,
    rpc::types::TransactionRequest,
    transports::TransportError,
};
use async_trait::async_trait;
use tracing::{debug, instrument, trace};

/// Failure of a single `eth_call`.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// The call reverted with the given payload.
    #[error("execution reverted: {0}")]
    Reverted(Bytes),
    /// The request did not complete.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Executes read-only calls against a chain.
#[async_trait]
pub trait CallTransport: Send + Sync + std::fmt::Debug {
    /// Performs an `eth_call` of `request` against the latest block.
    async fn call(&self, request: &EncodedCall) -> Result<Bytes, CallError>;
}

/// A [`CallTransport`] backed by an alloy [`Provider`].
#[derive(Debug, Clone)]
pub struct ProviderTransport<P> {
    provider: P,
}

impl<P> ProviderTransport<P> {
    /// Wraps `provider`.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns the wrapped provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P> CallTransport for ProviderTransport<P>
where
    P: Provider + std::fmt::Debug,
{
    async fn call(&self, request: &EncodedCall) -> Result<Bytes, CallError> {
        let tx = TransactionRequest::default().to(request.to).input(request.data.clone().into());
        self.provider.call(tx).await.map_err(|err| {
            match err.as_error_resp().and_then(|payload| payload.as_revert_data()) {
                Some(data) => CallError::Reverted(data),
                None => CallError::Transport(err),
            }
        })
    }
}

/// Client bundling a call transport, a CCIP-Read gateway fetcher and the configuration.
#[derive(Debug, Clone)]
pub struct EnsClient<T, G = reqwest::Client> {
    transport: T,
    gateway: G,
    config: EnsConfig,
}

impl<P> EnsClient<ProviderTransport<P>, reqwest::Client>
where
    P: Provider + std::fmt::Debug,
{
    /// Creates a client on top of an alloy provider, fetching gateways with a default
    /// [`reqwest::Client`].
    pub fn from_provider(provider: P, config: EnsConfig) -> Self {
        Self::new(ProviderTransport::new(provider), reqwest::Client::new(), config)
    }
}

impl<T, G> EnsClient<T, G> {
    /// Creates a new client.
    pub const fn new(transport: T, gateway: G, config: EnsConfig) -> Self {
        Self { transport, gateway, config }
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &EnsConfig {
        &self.config
    }

    /// Returns the call transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the gateway fetcher.
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }
}

impl<T, G> EnsClient<T, G>
where
    T: CallTransport,
    G: GatewayFetcher,
{
    /// Performs a single call, following off-chain lookups.
    ///
    /// A revert is returned as a failed [`CallResult`] for the decoder to interpret. CCIP-Read
    /// protocol errors and transport errors abort the call.
    #[instrument(skip_all, fields(to = %request.to))]
    pub async fn call(&self, request: &EncodedCall) -> Result<CallResult, EnsError> {
        match self.transport.call(request).await {
            Ok(data) => Ok(CallResult::success(data)),
            Err(CallError::Reverted(data)) if ccip::is_offchain_lookup(&data) => {
                let result = match ccip::decode_offchain_lookup(&data) {
                    Ok(lookup) => self.resolve_offchain_lookup(request.to, lookup).await,
                    Err(err) => Err(err.into()),
                };
                metrics::record_ccip_lookup(result.as_ref().is_ok_and(|r| r.success), false);
                result
            }
            Err(CallError::Reverted(data)) => {
                trace!(len = data.len(), "Call reverted");
                Ok(CallResult::failure(data))
            }
            Err(CallError::Transport(err)) => Err(err.into()),
        }
    }

    /// Follows an `OffchainLookup` raised by a call to `to`.
    ///
    /// Callbacks that revert with another `OffchainLookup` are followed up to the configured
    /// number of redirects.
    pub async fn resolve_offchain_lookup(
        &self,
        to: Address,
        lookup: OffchainLookup,
    ) -> Result<CallResult, EnsError> {
        let max_redirects = self.config.ccip.max_redirects;
        let mut lookup = lookup;

        for redirect in 0..max_redirects {
            debug!(%to, redirect, urls = lookup.urls.len(), "Following OffchainLookup");
            let callback = ccip::handle_offchain_lookup(&self.gateway, to, &lookup).await?;

            match self.transport.call(&callback).await {
                Ok(data) => return Ok(CallResult::success(data)),
                Err(CallError::Reverted(data)) if ccip::is_offchain_lookup(&data) => {
                    lookup = ccip::decode_offchain_lookup(&data)?;
                }
                Err(CallError::Reverted(data)) => return Ok(CallResult::failure(data)),
                Err(CallError::Transport(err)) => return Err(err.into()),
            }
        }

        Err(CcipError::TooManyRedirects(max_redirects).into())
    }
}
