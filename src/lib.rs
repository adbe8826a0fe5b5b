pub mod api;
pub mod cli;
pub mod commands;
pub mod core;

pub use api::{PromptStore, ShareError, StoreError};
pub use crate::core::filter::GalleryFilter;
pub use crate::core::link::{share_link, view_link, Resolved, Route};
pub use crate::core::share::{decode, encode};
pub use crate::core::storage::{
    AppCtx, Category, FileMedium, MemoryMedium, NewPrompt, PromptData, SharedData, StorageMedium,
};
