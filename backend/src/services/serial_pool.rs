//! Serial code pool backed by a plain text file
//!
//! The pool file holds every unused serial code, space separated, in
//! allocation order. Each allocation reads the whole file, hands out the first
//! code and rewrites the remainder.
//!
//! The file is not locked. Inside one process all callers go through a
//! [`SharedSerialPool`]; two processes allocating from the same file will
//! race and may hand out the same code.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use shared::{SerialCode, SerialCodeError};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Pool handle shared by request handlers
pub type SharedSerialPool = Arc<Mutex<SerialPool>>;

/// Serial pool failures
#[derive(Debug, Error)]
pub enum SerialPoolError {
    #[error("serial code file not found at {}", .path.display())]
    Missing { path: PathBuf },

    #[error("serial code pool is exhausted")]
    Exhausted,

    #[error("serial code file already exists at {}", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("malformed serial code {token:?} in pool: {source}")]
    Malformed {
        token: String,
        #[source]
        source: SerialCodeError,
    },

    #[error("serial code file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// File-backed pool of unused serial codes
#[derive(Debug, Clone)]
pub struct SerialPool {
    path: PathBuf,
}

impl SerialPool {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Wrap the pool for use from concurrent request handlers
    pub fn shared(self) -> SharedSerialPool {
        Arc::new(Mutex::new(self))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the pool file is present
    pub async fn exists(&self) -> bool {
        tokio::fs::metadata(&self.path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    /// Remove the first code from the pool and return it
    pub async fn take_next(&self) -> Result<SerialCode, SerialPoolError> {
        let contents = self.read().await?;
        let mut tokens = contents.split_whitespace();

        let first = tokens.next().ok_or(SerialPoolError::Exhausted)?;
        let serial: SerialCode = first.parse().map_err(|source| SerialPoolError::Malformed {
            token: first.to_string(),
            source,
        })?;

        let remaining = tokens.collect::<Vec<_>>().join(" ");
        tokio::fs::write(&self.path, remaining).await?;

        tracing::debug!(serial = %serial, path = %self.path.display(), "Serial code allocated");
        Ok(serial)
    }

    /// Number of codes left in the pool
    pub async fn remaining(&self) -> Result<usize, SerialPoolError> {
        let contents = self.read().await?;
        Ok(contents.split_whitespace().count())
    }

    /// Write a fresh pool with every serial code.
    ///
    /// Refuses to touch an existing file so that codes are never reissued.
    pub async fn create(&self) -> Result<usize, SerialPoolError> {
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await;

        let mut file = match file {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(SerialPoolError::AlreadyExists {
                    path: self.path.clone(),
                })
            }
            Err(err) => return Err(err.into()),
        };

        let codes: Vec<String> = SerialCode::full_pool().map(String::from).collect();
        file.write_all(codes.join(" ").as_bytes()).await?;
        file.flush().await?;

        tracing::info!(count = codes.len(), path = %self.path.display(), "Serial code pool created");
        Ok(codes.len())
    }

    async fn read(&self) -> Result<String, SerialPoolError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(SerialPoolError::Missing {
                path: self.path.clone(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}
