#![forbid(unsafe_code)]

pub mod json_file;
pub mod repository;
pub mod sqlite;

pub use repository::{
    CatalogRepository, InMemoryRepository, SettingsRepository, Storage, StorageError,
};
