//! Error types

mod config;
mod transport;

pub use config::*;
pub use transport::*;
