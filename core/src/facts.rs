//! # Fact Loading
//!
//! Reads every fact source and folds the per-host documents together.
//!
//! Sources are read in parallel but always merged in the order they were
//! given, so a later source overrides an earlier one no matter which finished
//! first.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use hostmap_common::facts::{FactDocument, MergePolicy};

mod loader;

pub use loader::FactLoader;

/// Merged fact documents keyed by host name.
pub type FactMap = BTreeMap<String, FactDocument>;

/// Folds one source's documents into the running result.
pub fn merge_into(target: &mut FactMap, documents: FactMap, policy: MergePolicy) {
    for (host, document) in documents {
        match target.entry(host) {
            Entry::Occupied(mut existing) => existing.get_mut().merge(document, policy),
            Entry::Vacant(slot) => {
                slot.insert(document);
            }
        }
    }
}
