pub mod config;
pub mod error;

pub use config::SynapseConfig;
pub use error::{Result, SynapseError};
