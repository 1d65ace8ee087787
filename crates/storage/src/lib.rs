//! Storage backends for opstrack data.

mod json_store;
mod trait_;

pub use json_store::JsonStore;
pub use trait_::{Result, StorageError, Store};
