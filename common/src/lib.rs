//! # hostmap-common
//!
//! Shared model of the resolution engine.
//!
//! * **[`inventory`]**: the unresolved group graph and host-range expansion.
//! * **[`facts`]**: per-host fact documents and their merge rules.
//! * **[`host`]**: the resolved host model handed to reporting layers.
//! * **[`config`]** / **[`error`]**: run configuration and error kinds.

pub mod config;
pub mod error;
pub mod facts;
pub mod host;
pub mod inventory;

/// Flat variable mapping. Backed by an ordered map, so iteration and
/// serialization are stable.
pub type Vars = serde_json::Map<String, serde_json::Value>;
