use crate::{
    config::EnsConfig,
    error::EnsError,
    function::EnsFunction,
    types::{CallResult, CallWithPassthrough, EncodedCall, IUniversalResolver},
    utils::name_to_wire,
};
use alloy::{primitives::Address, sol_types::SolCall};

/// Finds the resolver of a name through the universal resolver's `findResolver`.
///
/// Returns `None` when neither the name nor any of its parents has a resolver.
#[derive(Debug, Clone, Copy)]
pub struct GetResolver;

impl EnsFunction for GetResolver {
    type Args = String;
    type Passthrough = ();
    type Output = Address;

    fn encode(config: &EnsConfig, name: &String) -> Result<CallWithPassthrough, EnsError> {
        let data = IUniversalResolver::findResolverCall { name: name_to_wire(name)? }.abi_encode();
        Ok(CallWithPassthrough::new(EncodedCall::new(config.contracts.universal_resolver, data)))
    }

    fn decode(
        _config: &EnsConfig,
        response: CallResult,
        _passthrough: (),
        _name: &String,
    ) -> Result<Option<Address>, EnsError> {
        if !response.success {
            return Err(EnsError::Reverted(response.return_data));
        }
        let found = IUniversalResolver::findResolverCall::abi_decode_returns(&response.return_data)?;
        Ok((!found.resolver.is_zero()).then_some(found.resolver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{
        primitives::{B256, U256, address, bytes},
        sol_types::SolValue,
    };

    #[test]
    fn decodes_found_resolver() {
        let config = EnsConfig::mainnet();
        let resolver = address!("231b0Ee14048e9dCcD1d247744d114a4EB5E8E63");
        let data = (resolver, B256::ZERO, U256::ZERO).abi_encode_params();

        let found =
            GetResolver::decode(&config, CallResult::success(data), (), &"nick.eth".into()).unwrap();

        assert_eq!(found, Some(resolver));
    }

    #[test]
    fn zero_resolver_is_none() {
        let config = EnsConfig::mainnet();
        let data = (Address::ZERO, B256::ZERO, U256::ZERO).abi_encode_params();

        let found =
            GetResolver::decode(&config, CallResult::success(data), (), &"nick.eth".into()).unwrap();

        assert_eq!(found, None);
    }

    #[test]
    fn revert_is_an_error() {
        let config = EnsConfig::mainnet();
        let result = GetResolver::decode(&config, CallResult::failure(bytes!("00")), (), &"x".into());
        assert!(matches!(result, Err(EnsError::Reverted(_))));
    }
}
