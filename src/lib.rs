//! # ENS client
//!
//! Protocol layer of an ENS naming-service client: read operations defined as encode/decode pairs,
//! batched through Multicall3 `tryAggregate`, with per-call CCIP-Read (EIP-3668) recovery, plus
//! the DNS wire name and fuse codecs they rely on.

pub mod batch;
pub mod ccip;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod function;
pub mod functions;
pub mod metrics;
pub mod multicall;
pub mod types;
pub mod universal;
pub mod utils;

pub use batch::batch;
pub use client::EnsClient;
pub use config::EnsConfig;
pub use error::EnsError;
pub use function::{BatchItem, EnsFunction};
