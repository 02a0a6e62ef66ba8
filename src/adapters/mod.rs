// Adapters: concrete implementations of the domain ports.

pub mod local;
pub mod memory;
