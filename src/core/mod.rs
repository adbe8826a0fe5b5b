pub mod config;
pub mod crypto;
pub mod filter;
pub mod link;
pub mod share;
pub mod storage;
pub mod utils;
