use crate::{
    config::EnsConfig,
    error::EnsError,
    function::EnsFunction,
    types::{CallResult, CallWithPassthrough, IResolver},
    universal::{decode_resolve, encode_resolve},
    utils::namehash,
};
use alloy::sol_types::SolCall;

/// Arguments of [`GetText`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTextArgs {
    /// The name to read from.
    pub name: String,
    /// The text record key, e.g. `com.twitter`.
    pub key: String,
    /// Whether resolver errors are returned instead of `None`.
    pub strict: bool,
}

impl GetTextArgs {
    /// Non-strict lookup of `key` on `name`.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self { name: name.into(), key: key.into(), strict: false }
    }
}

/// Reads a text record through the universal resolver. An empty record is `None`.
#[derive(Debug, Clone, Copy)]
pub struct GetText;

impl EnsFunction for GetText {
    type Args = GetTextArgs;
    type Passthrough = ();
    type Output = String;

    fn encode(config: &EnsConfig, args: &GetTextArgs) -> Result<CallWithPassthrough, EnsError> {
        let data =
            IResolver::textCall { node: namehash(&args.name), key: args.key.clone() }.abi_encode();
        encode_resolve(config, &args.name, data.into()).map(CallWithPassthrough::new)
    }

    fn decode(
        _config: &EnsConfig,
        response: CallResult,
        _passthrough: (),
        args: &GetTextArgs,
    ) -> Result<Option<String>, EnsError> {
        let Some(response) = decode_resolve(response, args.strict)? else { return Ok(None) };
        if response.data.is_empty() {
            return Ok(None);
        }
        let text = IResolver::textCall::abi_decode_returns(&response.data)?;
        Ok((!text.is_empty()).then_some(text))
    }
}
