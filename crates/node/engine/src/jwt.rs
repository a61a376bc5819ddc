//! Sources of the engine API JWT secret.

use alloy_primitives::hex;
use alloy_rpc_types_engine::{JwtError, JwtSecret};
use std::{
    fmt::Debug,
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// An error obtaining the JWT secret.
#[derive(Error, Debug)]
pub enum JwtSecretError {
    /// The secret file exists but does not hold a hex encoded 32 byte secret.
    #[error("invalid JWT secret in {path}: {source}")]
    Invalid {
        /// The secret file.
        path: PathBuf,
        /// Why the content was rejected.
        #[source]
        source: JwtError,
    },
    /// The secret file could not be read or written.
    #[error("failed to access JWT secret file {path}: {source}")]
    Io {
        /// The secret file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Supplies the secret used to authenticate against the engine API.
pub trait JwtSecretProvider: Debug + Send + Sync {
    /// Returns the secret.
    fn secret(&self) -> Result<JwtSecret, JwtSecretError>;
}

/// A fixed secret.
#[derive(Debug, Clone, Copy)]
pub struct StaticJwtSecret(pub JwtSecret);

impl JwtSecretProvider for StaticJwtSecret {
    fn secret(&self) -> Result<JwtSecret, JwtSecretError> {
        Ok(self.0)
    }
}

/// A secret kept in a file.
///
/// The file is read when it exists. Otherwise a random secret is generated and written to it,
/// readable by the owner only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJwtSecret {
    path: PathBuf,
}

impl FileJwtSecret {
    /// Creates a provider backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the secret file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<JwtSecret, JwtSecretError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|source| JwtSecretError::Io { path: self.path.clone(), source })?;
        JwtSecret::from_hex(content.trim())
            .map_err(|source| JwtSecretError::Invalid { path: self.path.clone(), source })
    }

    fn generate(&self) -> Result<JwtSecret, JwtSecretError> {
        let io_err = |source| JwtSecretError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let secret = JwtSecret::random();
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(io_err)?;
        file.write_all(hex::encode(secret.as_bytes()).as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        info!(
            target: "morph::engine",
            path = %self.path.display(),
            "Generated a new JWT secret",
        );
        Ok(secret)
    }
}

impl JwtSecretProvider for FileJwtSecret {
    fn secret(&self) -> Result<JwtSecret, JwtSecretError> {
        if self.path.exists() { self.load() } else { self.generate() }
    }
}
