//! Multicall3 `tryAggregate` batching with per-slot CCIP-Read recovery.
//!
//! The aggregate call itself cannot follow an `OffchainLookup`: the revert of one sub-call is
//! captured as that slot's failed return data. Decoding therefore classifies each slot first and
//! then follows the lookups of the slots that need it, concurrently, before the results reach
//! the per-item decoders.

use crate::{
    ccip::{self, GatewayFetcher},
    client::{CallTransport, EnsClient},
    config::EnsConfig,
    error::EnsError,
    metrics,
    types::{CallResult, CallWithPassthrough, EncodedCall, IMulticall, OffchainLookup},
};
use alloy::{primitives::Bytes, sol_types::SolCall};
use futures_util::future::join_all;
use tracing::{debug, instrument, warn};

/// The classified outcome of one multicall slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    /// The sub-call succeeded.
    Success(Bytes),
    /// The sub-call reverted with a well-formed `OffchainLookup`.
    OffchainLookup {
        /// The decoded lookup.
        lookup: Box<OffchainLookup>,
        /// The raw revert payload, restored if the lookup cannot be completed.
        revert_data: Bytes,
    },
    /// The sub-call reverted for any other reason.
    Reverted(Bytes),
}

impl SlotOutcome {
    /// Classifies a raw multicall result.
    pub fn classify(result: IMulticall::Result) -> Self {
        if result.success {
            return Self::Success(result.returnData);
        }
        if !ccip::is_offchain_lookup(&result.returnData) {
            return Self::Reverted(result.returnData);
        }
        match ccip::decode_offchain_lookup(&result.returnData) {
            Ok(lookup) => {
                Self::OffchainLookup { lookup: Box::new(lookup), revert_data: result.returnData }
            }
            Err(err) => {
                debug!(%err, "Ignoring malformed OffchainLookup");
                Self::Reverted(result.returnData)
            }
        }
    }
}

/// Encodes `calls` as a single `tryAggregate` call.
///
/// The original calls are the passthrough; [`decode`] needs their targets to validate lookups.
pub fn encode(
    config: &EnsConfig,
    calls: Vec<EncodedCall>,
    require_success: bool,
) -> CallWithPassthrough<Vec<EncodedCall>> {
    let data = IMulticall::tryAggregateCall {
        requireSuccess: require_success,
        calls: calls
            .iter()
            .map(|call| IMulticall::Call { target: call.to, callData: call.data.clone() })
            .collect(),
    }
    .abi_encode();

    CallWithPassthrough::with_passthrough(EncodedCall::new(config.contracts.multicall, data), calls)
}

/// Decodes the `tryAggregate` return data into per-slot outcomes.
pub fn classify(data: &[u8]) -> Result<Vec<SlotOutcome>, EnsError> {
    Ok(IMulticall::tryAggregateCall::abi_decode_returns(data)?
        .into_iter()
        .map(SlotOutcome::classify)
        .collect())
}

/// Decodes a `tryAggregate` response, following the off-chain lookups of individual slots.
///
/// A slot whose lookup fails for any reason keeps its original failed result. The output is in
/// the order of `calls`.
#[instrument(skip_all, fields(calls = calls.len()))]
pub async fn decode<T, G>(
    client: &EnsClient<T, G>,
    data: &[u8],
    calls: &[EncodedCall],
) -> Result<Vec<CallResult>, EnsError>
where
    T: CallTransport,
    G: GatewayFetcher,
{
    let outcomes = classify(data)?;
    if outcomes.len() != calls.len() {
        return Err(EnsError::UnexpectedResultCount {
            expected: calls.len(),
            actual: outcomes.len(),
        });
    }

    let results = outcomes.into_iter().zip(calls).enumerate().map(|(index, (outcome, call))| {
        async move {
            let (lookup, revert_data) = match outcome {
                SlotOutcome::Success(data) => return CallResult::success(data),
                SlotOutcome::Reverted(data) => return CallResult::failure(data),
                SlotOutcome::OffchainLookup { lookup, revert_data } => (lookup, revert_data),
            };

            match client.resolve_offchain_lookup(call.to, *lookup).await {
                Ok(result) if result.success => {
                    metrics::record_ccip_lookup(true, true);
                    result
                }
                Ok(_) => {
                    warn!(index, to = %call.to, "OffchainLookup callback reverted");
                    metrics::record_ccip_lookup(false, true);
                    CallResult::failure(revert_data)
                }
                Err(err) => {
                    warn!(index, to = %call.to, %err, "OffchainLookup failed");
                    metrics::record_ccip_lookup(false, true);
                    CallResult::failure(revert_data)
                }
            }
        }
    });

    Ok(join_all(results).await)
}

/// Executes `calls` in one `tryAggregate` call with failures allowed.
///
/// Returns one result per call, in order, with off-chain lookups already followed.
pub async fn aggregate<T, G>(
    client: &EnsClient<T, G>,
    calls: Vec<EncodedCall>,
) -> Result<Vec<CallResult>, EnsError>
where
    T: CallTransport,
    G: GatewayFetcher,
{
    let request = encode(client.config(), calls, false);
    let response = client.call(&request.call).await?;
    if !response.success {
        return Err(EnsError::Reverted(response.return_data));
    }
    decode(client, &response.return_data, &request.passthrough).await
}
