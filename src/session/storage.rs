//! Token Storage
//!
//! Durable home for the session token. The browser front end keeps it in
//! localStorage; the CLI keeps it in a file; tests keep it in memory.

use crate::error::StorageError;

/// Persists exactly one opaque token string
pub trait TokenStorage {
    fn read(&self) -> Option<String>;
    fn write(&mut self, token: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-process token storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    token: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl TokenStorage for MemoryStorage {
    fn read(&self) -> Option<String> {
        self.token.clone()
    }

    fn write(&mut self, token: &str) -> Result<(), StorageError> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.token = None;
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileStorage;

#[cfg(feature = "native")]
mod file {
    use super::TokenStorage;
    use crate::error::StorageError;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    fn io_error(e: std::io::Error) -> StorageError {
        StorageError::Io(e.to_string())
    }

    /// Token kept in a single file, created with its parent directory on first write
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl TokenStorage for FileStorage {
        fn read(&self) -> Option<String> {
            let content = std::fs::read_to_string(&self.path).ok()?;
            let token = content.trim();
            if token.is_empty() {
                None
            } else {
                Some(token.to_string())
            }
        }

        fn write(&mut self, token: &str) -> Result<(), StorageError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
            let mut options = std::fs::OpenOptions::new();
            options.write(true).create(true).truncate(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                options.mode(0o600);
            }
            let mut file = options.open(&self.path).map_err(io_error)?;
            // The mode above only applies to newly created files
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                file.set_permissions(std::fs::Permissions::from_mode(0o600))
                    .map_err(io_error)?;
            }
            file.write_all(token.as_bytes()).map_err(io_error)
        }

        fn clear(&mut self) -> Result<(), StorageError> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(io_error(e)),
            }
        }
    }
}
