//! Client constants.

use alloy::primitives::{Address, address};

/// The Multicall3 deployment address.
///
/// Multicall3 is deployed at the same address on every supported chain.
/// See: <https://github.com/mds1/multicall#multicall3-contract-addresses>
pub const MULTICALL3_ADDRESS: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

/// The Universal Resolver deployment on Ethereum mainnet.
pub const MAINNET_UNIVERSAL_RESOLVER: Address =
    address!("ce01f8eee7E479C928F8919abD53E553a36CeF67");

/// The Name Wrapper deployment on Ethereum mainnet.
pub const MAINNET_NAME_WRAPPER: Address = address!("D4416b13d2b3a9aBae7AcD5D6C2BbDBE25686401");

/// Maximum byte length of a single label in the DNS wire format.
pub const MAX_WIRE_LABEL_LENGTH: usize = 255;

/// Default number of chained `OffchainLookup` reverts followed for one call.
pub const DEFAULT_CCIP_MAX_REDIRECTS: usize = 4;

