use crate::{
    config::EnsConfig,
    error::EnsError,
    function::EnsFunction,
    types::{CallResult, CallWithPassthrough, EncodedCall, INameWrapper},
    utils::{DecodedFuses, decode_fuses, namehash, wire_to_name},
};
use alloy::{
    primitives::{Address, U256},
    sol_types::SolCall,
};
use serde::{Deserialize, Serialize};

/// Ownership data of a wrapped name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperData {
    /// The owner of the wrapped name.
    pub owner: Address,
    /// The raw fuse value.
    pub raw_fuses: u32,
    /// The decoded fuses.
    pub fuses: DecodedFuses,
    /// Expiry as a unix timestamp, `None` if the name does not expire.
    pub expiry: Option<u64>,
}

/// Reads owner, fuses and expiry of a name from the name wrapper.
///
/// Names that are not wrapped have no owner and yield `None`.
#[derive(Debug, Clone, Copy)]
pub struct GetWrapperData;

impl EnsFunction for GetWrapperData {
    type Args = String;
    type Passthrough = ();
    type Output = WrapperData;

    fn encode(config: &EnsConfig, name: &String) -> Result<CallWithPassthrough, EnsError> {
        let id = U256::from_be_bytes(namehash(name).0);
        let data = INameWrapper::getDataCall { id }.abi_encode();
        Ok(CallWithPassthrough::new(EncodedCall::new(config.contracts.name_wrapper, data)))
    }

    fn decode(
        _config: &EnsConfig,
        response: CallResult,
        _passthrough: (),
        _name: &String,
    ) -> Result<Option<WrapperData>, EnsError> {
        if !response.success {
            return Err(EnsError::Reverted(response.return_data));
        }
        let data = INameWrapper::getDataCall::abi_decode_returns(&response.return_data)?;
        if data.owner.is_zero() {
            return Ok(None);
        }
        Ok(Some(WrapperData {
            owner: data.owner,
            raw_fuses: data.fuses,
            fuses: decode_fuses(data.fuses),
            expiry: (data.expiry > 0).then_some(data.expiry),
        }))
    }
}

/// Reads the full name the name wrapper stores for a node.
///
/// Useful to recover labels that are only known by their labelhash. Returns `None` if the wrapper
/// does not know the name.
#[derive(Debug, Clone, Copy)]
pub struct GetWrapperName;

impl EnsFunction for GetWrapperName {
    type Args = String;
    type Passthrough = ();
    type Output = String;

    fn encode(config: &EnsConfig, name: &String) -> Result<CallWithPassthrough, EnsError> {
        let data = INameWrapper::namesCall { node: namehash(name) }.abi_encode();
        Ok(CallWithPassthrough::new(EncodedCall::new(config.contracts.name_wrapper, data)))
    }

    fn decode(
        _config: &EnsConfig,
        response: CallResult,
        _passthrough: (),
        _name: &String,
    ) -> Result<Option<String>, EnsError> {
        if !response.success {
            return Err(EnsError::Reverted(response.return_data));
        }
        let wire = INameWrapper::namesCall::abi_decode_returns(&response.return_data)?;
        if wire.is_empty() {
            return Ok(None);
        }
        Ok(Some(wire_to_name(&wire)?))
    }
}
