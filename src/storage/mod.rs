//! Storage layer for ahr-cli
//!
//! Handles configuration management and credential storage. Uses the OS
//! keyring for the API token and TOML for configuration files.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
