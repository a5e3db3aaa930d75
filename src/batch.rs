//! Batching of [`EnsFunction`] calls into a single multicall.
//!
//! A batch is either a tuple of up to eight heterogeneous [`BatchItem`]s, producing a tuple of
//! outputs, or a `Vec` of items of the same operation, producing a `Vec` of outputs. Items can only
//! be built through [`EnsFunction::batch`], so every item has an encoder and a decoder.

use crate::{
    ccip::GatewayFetcher,
    client::{CallTransport, EnsClient},
    config::EnsConfig,
    error::EnsError,
    function::{BatchItem, EnsFunction},
    metrics, multicall,
    types::{CallResult, EncodedCall},
};
use std::time::Instant;
use tracing::{debug, instrument};

/// A set of batch items that encode into one multicall and decode from its results.
pub trait BatchSet {
    /// Passthroughs of the items, in item order.
    type Pending;
    /// Decoded outputs, in item order.
    type Output;

    /// Encodes every item.
    fn encode(&self, config: &EnsConfig) -> Result<(Vec<EncodedCall>, Self::Pending), EnsError>;

    /// Decodes `results`, one per item and in item order.
    fn decode(
        &self,
        config: &EnsConfig,
        pending: Self::Pending,
        results: Vec<CallResult>,
    ) -> Result<Self::Output, EnsError>;
}

fn check_count(expected: usize, actual: usize) -> Result<(), EnsError> {
    if expected != actual {
        return Err(EnsError::UnexpectedResultCount { expected, actual });
    }
    Ok(())
}

macro_rules! impl_batch_set {
    ($($item:ident: $idx:tt),+) => {
        impl<$($item: EnsFunction),+> BatchSet for ($(BatchItem<$item>,)+) {
            type Pending = ($($item::Passthrough,)+);
            type Output = ($(Option<$item::Output>,)+);

            fn encode(
                &self,
                config: &EnsConfig,
            ) -> Result<(Vec<EncodedCall>, Self::Pending), EnsError> {
                let mut calls = Vec::new();
                let pending = ($({
                    let request = self.$idx.encode(config)?;
                    calls.push(request.call);
                    request.passthrough
                },)+);
                Ok((calls, pending))
            }

            fn decode(
                &self,
                config: &EnsConfig,
                pending: Self::Pending,
                results: Vec<CallResult>,
            ) -> Result<Self::Output, EnsError> {
                check_count([$(stringify!($idx)),+].len(), results.len())?;
                let mut results = results.into_iter();
                Ok(($(
                    self.$idx.decode(config, results.next().unwrap_or_default(), pending.$idx)?,
                )+))
            }
        }
    };
}

impl_batch_set!(A: 0);
impl_batch_set!(A: 0, B: 1);
impl_batch_set!(A: 0, B: 1, C: 2);
impl_batch_set!(A: 0, B: 1, C: 2, D: 3);
impl_batch_set!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_batch_set!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_batch_set!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_batch_set!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

impl<F: EnsFunction> BatchSet for Vec<BatchItem<F>> {
    type Pending = Vec<F::Passthrough>;
    type Output = Vec<Option<F::Output>>;

    fn encode(&self, config: &EnsConfig) -> Result<(Vec<EncodedCall>, Self::Pending), EnsError> {
        let mut calls = Vec::with_capacity(self.len());
        let mut pending = Vec::with_capacity(self.len());
        for item in self {
            let request = item.encode(config)?;
            calls.push(request.call);
            pending.push(request.passthrough);
        }
        Ok((calls, pending))
    }

    fn decode(
        &self,
        config: &EnsConfig,
        pending: Self::Pending,
        results: Vec<CallResult>,
    ) -> Result<Self::Output, EnsError> {
        check_count(self.len(), results.len())?;
        self.iter()
            .zip(pending)
            .zip(results)
            .map(|((item, passthrough), result)| item.decode(config, result, passthrough))
            .collect()
    }
}

/// Executes `items` in one multicall and decodes every result with its item's decoder.
///
/// Sub-calls may fail individually; each decoder interprets its own failed slot. Off-chain
/// lookups of individual slots are followed before decoding. A batch without calls does not
/// touch the transport.
#[instrument(skip_all)]
pub async fn batch<T, G, B>(client: &EnsClient<T, G>, items: B) -> Result<B::Output, EnsError>
where
    T: CallTransport,
    G: GatewayFetcher,
    B: BatchSet,
{
    let config = client.config();
    let (calls, pending) = items.encode(config)?;
    if calls.is_empty() {
        return items.decode(config, pending, Vec::new());
    }

    let count = calls.len();
    debug!(calls = count, "Executing batch");
    let started = Instant::now();
    let results = multicall::aggregate(client, calls).await?;
    metrics::record_batch(count, started.elapsed());

    check_count(count, results.len())?;
    items.decode(config, pending, results)
}
