//! Persistent storage
//!
//! The refinement store is the only durable state the gateway owns.

pub mod refinement_store;

pub use refinement_store::{RefinementStore, StoreError};
