//! Resolution engine: reads facts and inventories and joins them into a
//! [`HostModel`](hostmap_common::host::HostModel).
//!
//! The entry point is [`ResolutionContext`]; the other modules are its stages
//! and are public for callers that only need one of them.

pub mod builder;
pub mod context;
pub mod facts;
pub mod inventory;
pub mod limit;
pub mod resolver;

pub use context::ResolutionContext;
