//! The universal resolver wrapper.
//!
//! Record reads go through `resolve(name, data)`, which finds the resolver of the name on-chain
//! and forwards `data` to it, raising `OffchainLookup` for off-chain resolvers.

use crate::{
    config::EnsConfig,
    error::{EnsError, ResolutionError},
    function::EnsFunction,
    types::{CallResult, CallWithPassthrough, EncodedCall, IUniversalResolver},
    utils::name_to_wire,
};
use alloy::{
    primitives::{Address, Bytes},
    sol_types::{SolCall, SolInterface},
};
use tracing::trace;

/// Arguments of a [`Resolve`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveArgs {
    /// The name to resolve.
    pub name: String,
    /// The encoded resolver call, e.g. `text(node, key)`.
    pub data: Bytes,
    /// Whether resolver errors are returned instead of being treated as "no record".
    pub strict: bool,
}

/// A successful universal resolver response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversalResponse {
    /// The resolver's return data.
    pub data: Bytes,
    /// The resolver that answered.
    pub resolver: Address,
}

/// Encodes `resolve(name, data)` for the configured universal resolver.
///
/// If the configuration carries gateway URLs, the overload taking a gateway list is used.
pub fn encode_resolve(config: &EnsConfig, name: &str, data: Bytes) -> Result<EncodedCall, EnsError> {
    let name = name_to_wire(name)?;
    let calldata = if config.gateway_urls.is_empty() {
        IUniversalResolver::resolve_0Call { name, data }.abi_encode()
    } else {
        IUniversalResolver::resolve_1Call { name, data, gateways: config.gateway_urls.clone() }
            .abi_encode()
    };
    Ok(EncodedCall::new(config.contracts.universal_resolver, calldata))
}

/// Decodes a `resolve` response.
///
/// Reverts yield `None`, or an error when `strict` is set.
pub fn decode_resolve(
    response: CallResult,
    strict: bool,
) -> Result<Option<UniversalResponse>, EnsError> {
    if !response.success {
        return check_revert(&response.return_data, strict).map(|()| None);
    }
    if response.return_data.is_empty() {
        return Ok(None);
    }

    let decoded = IUniversalResolver::resolve_0Call::abi_decode_returns(&response.return_data)?;
    Ok(Some(UniversalResponse { data: decoded.result, resolver: decoded.resolver }))
}

/// Interprets universal resolver revert data.
///
/// Non-strict lookups treat every revert as "no record" and return `Ok(())`. Strict lookups map
/// known universal resolver errors to [`ResolutionError`] and return anything else as
/// [`EnsError::Reverted`].
pub fn check_revert(revert_data: &Bytes, strict: bool) -> Result<(), EnsError> {
    use IUniversalResolver::IUniversalResolverErrors as Errors;

    let error = match Errors::abi_decode(revert_data) {
        Ok(Errors::ResolverNotFound(_)) => ResolutionError::ResolverNotFound,
        Ok(Errors::ResolverWildcardNotSupported(_)) => {
            ResolutionError::ResolverWildcardNotSupported
        }
        Ok(Errors::ResolverNotContract(_)) => ResolutionError::ResolverNotContract,
        Ok(Errors::ResolverError(err)) => ResolutionError::ResolverError(err.returnData),
        Ok(Errors::HttpError(err)) => ResolutionError::HttpError(
            err.errors.into_iter().map(|item| format!("{}: {}", item.status, item.message)).collect(),
        ),
        Err(_) if strict => return Err(EnsError::Reverted(revert_data.clone())),
        Err(_) => {
            trace!(len = revert_data.len(), "Treating unknown revert as no record");
            return Ok(());
        }
    };

    if strict {
        return Err(error.into());
    }
    trace!(%error, "Treating resolver error as no record");
    Ok(())
}

/// `resolve(name, data)` on the universal resolver, returning the raw resolver response.
#[derive(Debug, Clone, Copy)]
pub struct Resolve;

impl EnsFunction for Resolve {
    type Args = ResolveArgs;
    type Passthrough = ();
    type Output = UniversalResponse;

    fn encode(config: &EnsConfig, args: &ResolveArgs) -> Result<CallWithPassthrough, EnsError> {
        encode_resolve(config, &args.name, args.data.clone()).map(CallWithPassthrough::new)
    }

    fn decode(
        _config: &EnsConfig,
        response: CallResult,
        _passthrough: (),
        args: &ResolveArgs,
    ) -> Result<Option<UniversalResponse>, EnsError> {
        decode_resolve(response, args.strict)
    }
}
