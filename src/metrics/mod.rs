//! Metrics for batching and off-chain lookups.

use metrics::{counter, histogram};
use std::time::Duration;

/// Records a multicall batch that was sent.
pub fn record_batch(calls: usize, elapsed: Duration) {
    counter!("ens.batch.count").increment(1);
    histogram!("ens.batch.size").record(calls as f64);
    histogram!("ens.batch.latency").record(elapsed.as_millis() as f64);
}

/// Records the outcome of an off-chain lookup.
///
/// `batched` distinguishes lookups for a multicall slot from lookups of a single call.
pub fn record_ccip_lookup(recovered: bool, batched: bool) {
    counter!(
        "ens.ccip.lookup.count",
        "outcome" => if recovered { "recovered" } else { "failed" },
        "batched" => if batched { "true" } else { "false" }
    )
    .increment(1);
}

/// Records a gateway response by outcome.
pub fn record_gateway_response(outcome: &'static str, elapsed: Duration) {
    counter!("ens.ccip.gateway.count", "outcome" => outcome).increment(1);
    histogram!("ens.ccip.gateway.latency", "outcome" => outcome)
        .record(elapsed.as_millis() as f64);
}
