//! Storage integrations implementing the domain contracts.

pub mod persistence;
