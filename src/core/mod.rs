pub mod analyzer;
pub mod engine;
pub mod exporter;
pub mod importer;
pub mod rows;

pub use crate::domain::model::{EntityKind, EntityRecord, ImportStats};
pub use crate::domain::ports::{ConfigProvider, EntityStore, Storage};
pub use crate::utils::error::Result;
