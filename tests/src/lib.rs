//! End-to-end checks of the resolution engine against on-disk fixtures.

pub mod fixtures;

mod resolution;
