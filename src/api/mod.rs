//! Library API: the record store and its error types.

mod error;
mod store;

pub use error::{ShareError, StoreError};
pub use store::PromptStore;
