//! Infrastructure layer for Scout: file locations, configuration, secrets
//! and the on-disk player dataset.

pub mod config_service;
pub mod dataset;
pub mod paths;
pub mod secret_service;

pub use config_service::ConfigService;
pub use dataset::JsonPlayerDataset;
pub use paths::ScoutPaths;
pub use secret_service::SecretServiceImpl;
