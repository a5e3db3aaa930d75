//! Client configuration.
use crate::constants::{
    DEFAULT_CCIP_MAX_REDIRECTS, MAINNET_NAME_WRAPPER, MAINNET_UNIVERSAL_RESOLVER,
    MULTICALL3_ADDRESS,
};
use alloy::primitives::Address;
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Client configuration.
///
/// Every operation receives the configuration explicitly, there are no process wide defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsConfig {
    /// Contract addresses.
    pub contracts: ContractsConfig,
    /// CCIP-Read configuration.
    #[serde(default)]
    pub ccip: CcipConfig,
    /// Gateways the universal resolver should use for its own batched lookups.
    ///
    /// When empty, the universal resolver falls back to its built-in gateways.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gateway_urls: Vec<String>,
}

impl EnsConfig {
    /// Configuration for Ethereum mainnet.
    pub fn mainnet() -> Self {
        Self {
            contracts: ContractsConfig {
                multicall: MULTICALL3_ADDRESS,
                universal_resolver: MAINNET_UNIVERSAL_RESOLVER,
                name_wrapper: MAINNET_NAME_WRAPPER,
            },
            ccip: CcipConfig::default(),
            gateway_urls: Vec::new(),
        }
    }

    /// Loads a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("failed to open config {}", path.display()))?;
        let config = serde_yaml::from_reader(&file)
            .wrap_err_with(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Saves the configuration to a YAML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> eyre::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Sets the multicall address.
    pub fn with_multicall(mut self, multicall: Address) -> Self {
        self.contracts.multicall = multicall;
        self
    }

    /// Sets the universal resolver address.
    pub fn with_universal_resolver(mut self, universal_resolver: Address) -> Self {
        self.contracts.universal_resolver = universal_resolver;
        self
    }

    /// Sets the name wrapper address.
    pub fn with_name_wrapper(mut self, name_wrapper: Address) -> Self {
        self.contracts.name_wrapper = name_wrapper;
        self
    }

    /// Sets the maximum number of chained off-chain lookups.
    pub fn with_ccip_max_redirects(mut self, max_redirects: usize) -> Self {
        self.ccip.max_redirects = max_redirects;
        self
    }

    /// Sets the gateways passed to the universal resolver.
    pub fn with_gateway_urls(mut self, urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.gateway_urls = urls.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for EnsConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

/// Contract addresses used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractsConfig {
    /// The Multicall3 contract.
    pub multicall: Address,
    /// The universal resolver.
    pub universal_resolver: Address,
    /// The name wrapper.
    pub name_wrapper: Address,
}

/// CCIP-Read configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcipConfig {
    /// Maximum number of chained `OffchainLookup` reverts followed for one call.
    pub max_redirects: usize,
}

impl Default for CcipConfig {
    fn default() -> Self {
        Self { max_redirects: DEFAULT_CCIP_MAX_REDIRECTS }
    }
}
