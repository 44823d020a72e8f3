pub mod config;
pub mod device;
pub mod errors;
pub mod store;
pub mod upload;
