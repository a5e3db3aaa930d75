//! CCIP-Read (EIP-3668) off-chain lookups.
//!
//! A contract signals that it needs off-chain data by reverting with `OffchainLookup`. The client
//! fetches the data from one of the listed gateways and re-submits it to the contract's callback
//! as a view call, which verifies the response.

use crate::{
    error::{CcipError, GatewayFailure},
    metrics,
    types::{EncodedCall, OffchainLookup},
};
use alloy::{
    primitives::{Address, Bytes, hex},
    sol_types::{SolError, SolValue},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Instant};
use tracing::{debug, instrument, trace};

/// A single request to a gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    /// The URL with `{sender}` and `{data}` substituted.
    pub url: String,
    /// The JSON body of a POST request, `None` for a GET request.
    pub body: Option<GatewayRequestBody>,
}

/// JSON body of a POST gateway request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRequestBody {
    /// The lookup's call data.
    pub data: Bytes,
    /// The lookup's sender, lowercase hex.
    pub sender: String,
}

/// A raw gateway response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Whether the response declared a JSON content type.
    pub is_json: bool,
    /// The response body.
    pub body: String,
}

#[derive(Deserialize)]
struct GatewayResponseBody {
    data: Bytes,
}

/// Issues HTTP requests to CCIP-Read gateways.
#[async_trait]
pub trait GatewayFetcher: Send + Sync + std::fmt::Debug {
    /// Sends `request` and returns the raw response.
    ///
    /// Errors are reserved for requests that could not be completed at all; HTTP error statuses
    /// are returned as responses.
    async fn fetch(&self, request: &GatewayRequest) -> Result<GatewayResponse, CcipError>;
}

#[async_trait]
impl GatewayFetcher for reqwest::Client {
    async fn fetch(&self, request: &GatewayRequest) -> Result<GatewayResponse, CcipError> {
        let builder = match &request.body {
            Some(body) => self.post(&request.url).json(body),
            None => self.get(&request.url),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));
        let body = response.text().await?;

        Ok(GatewayResponse { status, is_json, body })
    }
}

/// Returns `true` if `revert_data` starts with the `OffchainLookup` selector.
pub fn is_offchain_lookup(revert_data: &[u8]) -> bool {
    revert_data.starts_with(&OffchainLookup::SELECTOR)
}

/// Decodes an `OffchainLookup` revert payload.
pub fn decode_offchain_lookup(revert_data: &[u8]) -> Result<OffchainLookup, CcipError> {
    OffchainLookup::abi_decode(revert_data).map_err(CcipError::MalformedLookup)
}

/// Builds the request for a single gateway URL.
///
/// URLs containing `{data}` are fetched with GET, all others with a POST of the JSON body
/// `{"data", "sender"}`.
pub fn gateway_request(url: &str, sender: Address, data: &Bytes) -> GatewayRequest {
    let sender = hex::encode_prefixed(sender);
    let href = url.replace("{sender}", &sender).replace("{data}", &hex::encode_prefixed(data));
    let body = (!url.contains("{data}"))
        .then(|| GatewayRequestBody { data: data.clone(), sender });
    GatewayRequest { url: href, body }
}

/// Queries `urls` in order until one returns a usable response.
///
/// A 4xx status aborts immediately. 5xx statuses, unreachable gateways, empty and malformed bodies
/// move on to the next URL.
#[instrument(skip_all, fields(%sender, urls = urls.len()))]
pub async fn ccip_request<G>(
    fetcher: &G,
    sender: Address,
    urls: &[String],
    data: &Bytes,
) -> Result<Bytes, CcipError>
where
    G: GatewayFetcher + ?Sized,
{
    if urls.is_empty() {
        return Err(CcipError::NoGateways);
    }

    let mut failures = Vec::new();
    for url in urls {
        let request = gateway_request(url, sender, data);
        let started = Instant::now();

        let response = match fetcher.fetch(&request).await {
            Ok(response) => response,
            Err(err) => {
                metrics::record_gateway_response("unreachable", started.elapsed());
                debug!(url = %request.url, %err, "Gateway unreachable");
                failures.push(GatewayFailure { url: request.url, reason: err.to_string() });
                continue;
            }
        };

        match response.status {
            200..=299 => {}
            status @ 400..=499 => {
                metrics::record_gateway_response("rejected", started.elapsed());
                return Err(CcipError::GatewayRejected {
                    url: request.url,
                    status,
                    message: response.body,
                });
            }
            status => {
                metrics::record_gateway_response("unavailable", started.elapsed());
                debug!(url = %request.url, status, "Gateway unavailable");
                failures.push(GatewayFailure { url: request.url, reason: format!("status {status}") });
                continue;
            }
        }

        match parse_response(&response) {
            Ok(result) if !result.is_empty() => {
                metrics::record_gateway_response("ok", started.elapsed());
                trace!(url = %request.url, len = result.len(), "Gateway responded");
                return Ok(result);
            }
            Ok(_) => {
                metrics::record_gateway_response("empty", started.elapsed());
                failures.push(GatewayFailure { url: request.url, reason: "empty response".into() });
            }
            Err(reason) => {
                metrics::record_gateway_response("malformed", started.elapsed());
                failures.push(GatewayFailure { url: request.url, reason });
            }
        }
    }

    Err(CcipError::GatewaysExhausted(failures))
}

fn parse_response(response: &GatewayResponse) -> Result<Bytes, String> {
    if response.is_json {
        return serde_json::from_str::<GatewayResponseBody>(&response.body)
            .map(|body| body.data)
            .map_err(|err| format!("malformed json response: {err}"));
    }

    let body = response.body.trim();
    if body.is_empty() {
        return Ok(Bytes::new());
    }
    if !body.starts_with("0x") {
        return Err("response is not hex".into());
    }
    Bytes::from_str(body).map_err(|err| format!("malformed response: {err}"))
}

/// Builds the callback view call carrying a gateway response.
pub fn callback_call(to: Address, lookup: &OffchainLookup, response: Bytes) -> EncodedCall {
    let mut data = lookup.callbackFunction.to_vec();
    data.extend_from_slice(&(response, lookup.extraData.clone()).abi_encode_params());
    EncodedCall::new(to, data)
}

/// Runs the gateway round trip for an `OffchainLookup` raised by a call to `to`.
///
/// Returns the callback call to submit; the caller executes it.
pub async fn handle_offchain_lookup<G>(
    fetcher: &G,
    to: Address,
    lookup: &OffchainLookup,
) -> Result<EncodedCall, CcipError>
where
    G: GatewayFetcher + ?Sized,
{
    if lookup.sender != to {
        return Err(CcipError::SenderMismatch { sender: lookup.sender, to });
    }

    let response = ccip_request(fetcher, lookup.sender, &lookup.urls, &lookup.callData).await?;
    Ok(callback_call(to, lookup, response))
}
