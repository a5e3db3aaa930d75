//! ENS contract interfaces.

use alloy::sol;

sol! {
    /// The universal resolver.
    ///
    /// `resolve` performs resolver discovery and off-chain aware dispatch on-chain, reverting with
    /// `OffchainLookup` when the resolver needs a gateway round trip.
    #[derive(Debug)]
    interface IUniversalResolver {
        /// An error reported by one of the gateways queried by the universal resolver.
        #[derive(PartialEq, Eq)]
        struct HttpErrorItem {
            uint16 status;
            string message;
        }

        error ResolverNotFound();
        error ResolverWildcardNotSupported();
        error ResolverNotContract();
        error ResolverError(bytes returnData);
        error HttpError(HttpErrorItem[] errors);

        /// Resolves `data` against the resolver of the wire encoded `name`.
        function resolve(bytes calldata name, bytes memory data)
            external
            view
            returns (bytes memory result, address resolver);

        /// Resolves `data`, using `gateways` for the universal resolver's own batch lookups.
        function resolve(bytes calldata name, bytes memory data, string[] memory gateways)
            external
            view
            returns (bytes memory result, address resolver);

        /// CCIP-Read callback of `resolve`.
        function resolveCallback(bytes calldata response, bytes calldata extraData)
            external
            view
            returns (bytes memory result, address resolver);

        /// Finds the resolver responsible for the wire encoded `name`.
        function findResolver(bytes calldata name)
            external
            view
            returns (address resolver, bytes32 node, uint256 offset);
    }
}

sol! {
    /// The record reading subset of a public resolver.
    #[derive(Debug)]
    interface IResolver {
        /// Returns the text record `key` of `node`.
        function text(bytes32 node, string calldata key) external view returns (string memory);

        /// Returns the ETH address of `node`.
        function addr(bytes32 node) external view returns (address);
    }
}

sol! {
    /// The reading subset of the name wrapper.
    #[derive(Debug)]
    interface INameWrapper {
        /// Returns the owner, fuses and expiry of the wrapped name `id`.
        function getData(uint256 id) external view returns (address owner, uint32 fuses, uint64 expiry);

        /// Returns the wire encoded name of `node`, if the wrapper knows it.
        function names(bytes32 node) external view returns (bytes memory);
    }
}
