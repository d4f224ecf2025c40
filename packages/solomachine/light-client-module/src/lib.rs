#![doc = include_str!("../README.md")]
#![deny(clippy::nursery, clippy::pedantic, warnings, missing_docs)]

pub mod client_id;
mod error;
pub mod module;
pub mod state;

pub use error::ModuleError;
pub use module::LightClientModule;
