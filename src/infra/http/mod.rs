//! HTTP transport for the remote settings store

pub mod dto;
pub mod mapper;
pub mod store;

pub use store::HttpSettingsStore;
