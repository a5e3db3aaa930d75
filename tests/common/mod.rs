//! In-process chain and gateway doubles.
#![allow(dead_code)]

use alloy::{
    primitives::{Address, B256, Bytes, U256, address},
    sol_types::{SolCall, SolError, SolValue},
};
use async_trait::async_trait;
use ens_client::{
    EnsClient, EnsConfig,
    ccip::{GatewayFetcher, GatewayRequest, GatewayResponse},
    client::{CallError, CallTransport},
    error::CcipError,
    types::{EncodedCall, IMulticall, IResolver, IUniversalResolver, OffchainLookup},
    utils::{namehash, wire_to_name},
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

/// The resolver reported by the universal resolver double.
pub const RESOLVER: Address = address!("231b0Ee14048e9dCcD1d247744d114a4EB5E8E63");

/// The gateway the off-chain names point to.
pub const GATEWAY_URL: &str = "https://gateway.test/lookup";

/// An unrelated contract used as a bogus `OffchainLookup` sender.
pub const STRANGER: Address = address!("00000000000000000000000000000000deadbeef");

/// Record storage shared by the on-chain resolver and the gateway.
#[derive(Debug, Default, Clone)]
pub struct Records {
    texts: HashMap<(B256, String), String>,
    addrs: HashMap<B256, Address>,
}

impl Records {
    pub fn with_text(mut self, name: &str, key: &str, value: &str) -> Self {
        self.texts.insert((namehash(name), key.to_string()), value.to_string());
        self
    }

    pub fn with_addr(mut self, name: &str, addr: Address) -> Self {
        self.addrs.insert(namehash(name), addr);
        self
    }

    /// Answers a resolver call, `Err` carrying revert data.
    pub fn answer(&self, data: &[u8]) -> Result<Bytes, Bytes> {
        if let Ok(call) = IResolver::textCall::abi_decode(data) {
            let text = self.texts.get(&(call.node, call.key)).cloned().unwrap_or_default();
            return Ok((text,).abi_encode_params().into());
        }
        if let Ok(call) = IResolver::addrCall::abi_decode(data) {
            let addr = self.addrs.get(&call.node).copied().unwrap_or_default();
            return Ok((addr,).abi_encode_params().into());
        }
        Err(Bytes::new())
    }
}

/// How the universal resolver double serves a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Records are answered directly.
    OnChain,
    /// Records are served through the gateway.
    OffChain,
    /// Like `OffChain`, but the lookup names a sender other than the universal resolver.
    WrongSender,
    /// Every callback raises another lookup.
    Redirecting,
}

/// A chain with Multicall3 and a universal resolver.
#[derive(Debug, Clone)]
pub struct MockChain {
    config: EnsConfig,
    names: HashMap<String, Mode>,
    records: Records,
    calls: Arc<Mutex<Vec<EncodedCall>>>,
}

impl MockChain {
    pub fn new(config: EnsConfig, records: Records) -> Self {
        Self { config, names: HashMap::new(), records, calls: Default::default() }
    }

    pub fn with_name(mut self, name: &str, mode: Mode) -> Self {
        self.names.insert(name.to_string(), mode);
        self
    }

    /// Number of `eth_call`s received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn execute(&self, call: &EncodedCall) -> Result<Bytes, Bytes> {
        if call.to == self.config.contracts.multicall {
            self.try_aggregate(&call.data)
        } else if call.to == self.config.contracts.universal_resolver {
            self.universal_resolver(&call.data)
        } else {
            Err(Bytes::new())
        }
    }

    fn try_aggregate(&self, data: &[u8]) -> Result<Bytes, Bytes> {
        let call = IMulticall::tryAggregateCall::abi_decode(data).map_err(|_| Bytes::new())?;
        let mut results = Vec::new();
        for sub in call.calls {
            let result = self.execute(&EncodedCall::new(sub.target, sub.callData));
            if call.requireSuccess && result.is_err() {
                return Err(Bytes::new());
            }
            results.push(match result {
                Ok(data) => IMulticall::Result { success: true, returnData: data },
                Err(data) => IMulticall::Result { success: false, returnData: data },
            });
        }
        Ok((results,).abi_encode_params().into())
    }

    fn universal_resolver(&self, data: &[u8]) -> Result<Bytes, Bytes> {
        let ur = self.config.contracts.universal_resolver;

        if let Ok(call) = IUniversalResolver::resolveCallbackCall::abi_decode(data) {
            let (redirect, inner) =
                <(bool, Bytes)>::abi_decode_params(&call.extraData).map_err(|_| Bytes::new())?;
            if redirect {
                return Err(lookup(ur, inner, true));
            }
            return Ok((call.response, RESOLVER).abi_encode_params().into());
        }

        if let Ok(call) = IUniversalResolver::findResolverCall::abi_decode(data) {
            let name = wire_to_name(&call.name).map_err(|_| Bytes::new())?;
            let resolver = if self.names.contains_key(&name) { RESOLVER } else { Address::ZERO };
            return Ok((resolver, namehash(&name), U256::ZERO).abi_encode_params().into());
        }

        let call = IUniversalResolver::resolve_0Call::abi_decode(data).map_err(|_| Bytes::new())?;
        let name = wire_to_name(&call.name).map_err(|_| Bytes::new())?;

        match self.names.get(&name) {
            None => Err(SolError::abi_encode(&IUniversalResolver::ResolverNotFound {}).into()),
            Some(Mode::OnChain) => match self.records.answer(&call.data) {
                Ok(result) => Ok((result, RESOLVER).abi_encode_params().into()),
                Err(revert) => {
                    let error = IUniversalResolver::ResolverError { returnData: revert };
                    Err(SolError::abi_encode(&error).into())
                }
            },
            Some(Mode::OffChain) => Err(lookup(ur, call.data, false)),
            Some(Mode::WrongSender) => Err(lookup(STRANGER, call.data, false)),
            Some(Mode::Redirecting) => Err(lookup(ur, call.data, true)),
        }
    }
}

/// Builds an `OffchainLookup` revert asking the gateway to answer `data`.
///
/// With `redirect` set the callback raises the same lookup again.
fn lookup(sender: Address, data: Bytes, redirect: bool) -> Bytes {
    let lookup = OffchainLookup {
        sender,
        urls: vec![GATEWAY_URL.to_string()],
        callData: data.clone(),
        callbackFunction: IUniversalResolver::resolveCallbackCall::SELECTOR.into(),
        extraData: (redirect, data).abi_encode_params().into(),
    };
    SolError::abi_encode(&lookup).into()
}

#[async_trait]
impl CallTransport for MockChain {
    async fn call(&self, request: &EncodedCall) -> Result<Bytes, CallError> {
        self.calls.lock().unwrap().push(request.clone());
        self.execute(request).map_err(CallError::Reverted)
    }
}

/// A gateway answering resolver calls from [`Records`].
#[derive(Debug, Clone)]
pub struct MockGateway {
    records: Records,
    status: u16,
    text_latency: Duration,
    addr_latency: Duration,
    requests: Arc<Mutex<Vec<GatewayRequest>>>,
}

impl MockGateway {
    pub fn new(records: Records) -> Self {
        Self {
            records,
            status: 200,
            text_latency: Duration::ZERO,
            addr_latency: Duration::ZERO,
            requests: Default::default(),
        }
    }

    /// Delays answers to `text` requests by `text` and every other answer by `addr`.
    pub fn with_latency(mut self, text: Duration, addr: Duration) -> Self {
        self.text_latency = text;
        self.addr_latency = addr;
        self
    }

    /// Makes every request fail with `status`.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Number of gateway requests received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GatewayFetcher for MockGateway {
    async fn fetch(&self, request: &GatewayRequest) -> Result<GatewayResponse, CcipError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.status != 200 {
            return Ok(GatewayResponse {
                status: self.status,
                is_json: false,
                body: "gateway error".into(),
            });
        }

        let data = request.body.as_ref().map(|body| body.data.clone()).unwrap_or_default();
        let latency = if IResolver::textCall::abi_decode(&data).is_ok() {
            self.text_latency
        } else {
            self.addr_latency
        };
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let body = match self.records.answer(&data) {
            Ok(answer) => serde_json::json!({ "data": answer }).to_string(),
            Err(_) => String::new(),
        };
        Ok(GatewayResponse { status: 200, is_json: true, body })
    }
}

/// Names served by the test setup.
pub const ONCHAIN: &str = "nick.eth";
pub const OFFCHAIN: &str = "offchain.test.eth";
pub const WRONG_SENDER: &str = "wrong-sender.eth";
pub const REDIRECTING: &str = "loop.eth";
pub const UNKNOWN: &str = "unknown.eth";

pub const NICK: Address = address!("b8c2C29ee19D8307cb7255e1Cd9CbDE883A267d5");
pub const OFFCHAIN_ADDR: Address = address!("00000000000000000000000000000000000000c1");

/// Records of every test name.
pub fn records() -> Records {
    Records::default()
        .with_text(ONCHAIN, "url", "https://ens.domains")
        .with_addr(ONCHAIN, NICK)
        .with_text(OFFCHAIN, "url", "https://offchain.example")
        .with_addr(OFFCHAIN, OFFCHAIN_ADDR)
        .with_addr(WRONG_SENDER, OFFCHAIN_ADDR)
}

/// A client over the test chain, with `gateway` serving off-chain records.
pub fn client_with(config: EnsConfig, gateway: MockGateway) -> EnsClient<MockChain, MockGateway> {
    let chain = MockChain::new(config.clone(), records())
        .with_name(ONCHAIN, Mode::OnChain)
        .with_name(OFFCHAIN, Mode::OffChain)
        .with_name(WRONG_SENDER, Mode::WrongSender)
        .with_name(REDIRECTING, Mode::Redirecting);
    EnsClient::new(chain, gateway, config)
}

/// A client over the test chain with a working gateway.
pub fn client() -> EnsClient<MockChain, MockGateway> {
    client_with(EnsConfig::mainnet(), MockGateway::new(records()))
}
