use crate::{
    config::EnsConfig,
    error::EnsError,
    function::EnsFunction,
    types::{CallResult, CallWithPassthrough, IResolver},
    universal::{decode_resolve, encode_resolve},
    utils::namehash,
};
use alloy::{primitives::Address, sol_types::SolCall};

/// Arguments of [`GetAddr`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAddrArgs {
    /// The name to read from.
    pub name: String,
    /// Whether resolver errors are returned instead of `None`.
    pub strict: bool,
}

impl GetAddrArgs {
    /// Non-strict lookup of `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), strict: false }
    }

    /// Strict lookup of `name`.
    pub fn strict(name: impl Into<String>) -> Self {
        Self { name: name.into(), strict: true }
    }
}

/// Reads the ETH address of a name through the universal resolver. The zero address is `None`.
#[derive(Debug, Clone, Copy)]
pub struct GetAddr;

impl EnsFunction for GetAddr {
    type Args = GetAddrArgs;
    type Passthrough = ();
    type Output = Address;

    fn encode(config: &EnsConfig, args: &GetAddrArgs) -> Result<CallWithPassthrough, EnsError> {
        let data = IResolver::addrCall { node: namehash(&args.name) }.abi_encode();
        encode_resolve(config, &args.name, data.into()).map(CallWithPassthrough::new)
    }

    fn decode(
        _config: &EnsConfig,
        response: CallResult,
        _passthrough: (),
        args: &GetAddrArgs,
    ) -> Result<Option<Address>, EnsError> {
        let Some(response) = decode_resolve(response, args.strict)? else { return Ok(None) };
        if response.data.is_empty() {
            return Ok(None);
        }
        let address = IResolver::addrCall::abi_decode_returns(&response.data)?;
        Ok((!address.is_zero()).then_some(address))
    }
}
