//! Configuration loading and file formats.

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileApiConfig, FileConfig, FileLocaleConfig, FileStorageConfig, FileSupportConfig,
};
pub use loader::ConfigLoader;
