//! Multicall contract interface for batching multiple calls.

use alloy::sol;

sol! {
    /// The subset of Multicall3 used for batching reads.
    ///
    /// `tryAggregate` isolates failures per call unless `requireSuccess` is set.
    #[derive(Debug)]
    interface IMulticall {
        /// Represents a single call in a multicall batch
        #[derive(PartialEq, Eq)]
        struct Call {
            /// Target contract address
            address target;
            /// Encoded function call data
            bytes callData;
        }

        /// Result of a single call in the batch
        #[derive(PartialEq, Eq)]
        struct Result {
            /// Whether the call was successful
            bool success;
            /// The return data from the call, or the revert payload
            bytes returnData;
        }

        /// Execute multiple calls, optionally tolerating failures.
        function tryAggregate(bool requireSuccess, Call[] calldata calls)
            external
            payable
            returns (Result[] memory returnData);
    }
}

sol! {
    /// EIP-3668 revert instructing the caller to fetch data from an off-chain gateway.
    #[derive(Debug, PartialEq, Eq)]
    error OffchainLookup(
        address sender,
        string[] urls,
        bytes callData,
        bytes4 callbackFunction,
        bytes extraData
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{
        primitives::hex,
        sol_types::{SolCall, SolError},
    };

    #[test]
    fn selectors_are_stable() {
        assert_eq!(IMulticall::tryAggregateCall::SELECTOR, hex!("bce38bd7"));
        assert_eq!(OffchainLookup::SELECTOR, hex!("556f1830"));
    }
}
