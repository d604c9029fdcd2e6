//! Command implementations.
//!
//! Every command runs against a [`Context`] holding the storefront opened
//! over the file-backed store and the catalog loaded from disk.

pub mod cart;
pub mod catalog;
pub mod filter;
pub mod orders;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use luxury_jewelry_storefront::clock::SystemClock;
use luxury_jewelry_storefront::config::{ConfigError, StorefrontConfig};
use luxury_jewelry_storefront::error::AppError;
use luxury_jewelry_storefront::extractor::CatalogEntry;
use luxury_jewelry_storefront::state::Storefront;
use luxury_jewelry_storefront::storage::FileStore;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Catalog file could not be read or written.
    #[error("Catalog file {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not a JSON array of entries.
    #[error("Catalog file {path} is malformed: {source}")]
    CatalogFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A storefront operation failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// Invalid command-line value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Output could not be encoded.
    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Everything a command needs.
pub struct Context {
    pub app: Storefront<FileStore>,
    pub json: bool,
}

impl Context {
    /// Load configuration, open storage and read the catalog at
    /// `catalog_path`.
    ///
    /// A missing catalog file leaves the catalog empty. Ids synthesized for
    /// entries without one are written back to the file so they stay stable
    /// between runs.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the catalog file
    /// exists but cannot be read, parsed or updated.
    pub fn open(catalog_path: &Path, json: bool) -> Result<Self, CliError> {
        let config = StorefrontConfig::from_env()?;
        info!(storage_dir = %config.storage_dir.display(), "Opening storefront state");

        let store = Rc::new(FileStore::new(config.storage_dir.clone()));
        let mut app = Storefront::new(config, store, Rc::new(SystemClock));

        let Some(mut entries) = read_catalog(catalog_path)? else {
            warn!(path = %catalog_path.display(), "Catalog file not found, catalog is empty");
            return Ok(Self { app, json });
        };

        let before = entries.clone();
        let loaded = app.load_catalog(&mut entries);
        debug!(loaded, "Catalog loaded");

        if entries != before {
            write_catalog(catalog_path, &entries)?;
            info!(path = %catalog_path.display(), "Stored synthesized product ids");
        }

        Ok(Self { app, json })
    }

    /// Print `value` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be encoded.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CliError> {
        let text = serde_json::to_string_pretty(value)?;
        #[allow(clippy::print_stdout)]
        {
            println!("{text}");
        }
        Ok(())
    }

    /// Print the toasts raised by the command.
    pub fn print_notices(&mut self) {
        let notices = self.app.drain_notices();
        if self.json {
            return;
        }
        #[allow(clippy::print_stdout)]
        {
            for notice in notices {
                println!("» {}", notice.message);
            }
        }
    }
}

fn read_catalog(path: &Path) -> Result<Option<Vec<CatalogEntry>>, CliError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(CliError::CatalogIo {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| CliError::CatalogFormat {
            path: path.to_path_buf(),
            source,
        })
}

fn write_catalog(path: &Path, entries: &[CatalogEntry]) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(entries)?;
    fs::write(path, text).map_err(|source| CliError::CatalogIo {
        path: path.to_path_buf(),
        source,
    })
}
