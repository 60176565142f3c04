pub mod config_model;
pub mod config_repository;
pub mod config_service;

pub use config_model::{DashboardConfig, ExportPayload, EXPORT_PAYLOAD_VERSION};
pub use config_repository::{ConfigRepositoryTrait, FileConfigRepository, MemoryConfigRepository};
pub use config_service::{ConfigService, ConfigServiceTrait};
