pub mod config;
pub mod encoder;
pub mod error;
pub mod session;
pub mod types;
