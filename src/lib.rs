pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::local::LocalStorage;
pub use adapters::memory::MemoryStore;
pub use config::{CliConfig, Command, ResolvedConfig};
pub use core::engine::RegistryEngine;
pub use utils::error::{RegistryError, Result};
