//! File storage behind the `/files/` routes.
//!
//! Names come straight from the request path. Anything that could step
//! outside the base directory is refused with `InvalidInput`; every error
//! ends up as a 404 at the router, so callers cannot tell the causes apart.

use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Reads and writes files under an optional base directory.
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    root: Option<PathBuf>,
}

impl FileStore {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Maps a client-supplied name to a path under the base directory.
    pub fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        let root = self.root.as_ref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no file directory configured")
        })?;

        let relative = Path::new(name);
        let is_plain = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !is_plain {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing file name {name:?}"),
            ));
        }

        Ok(root.join(relative))
    }

    pub async fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve(name)?;
        fs::read(path).await
    }

    /// Creates or truncates the file and writes `contents` to it.
    pub async fn write(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        let path = self.resolve(name)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o644);

        let mut file = options.open(path).await?;
        file.write_all(contents).await?;
        file.flush().await
    }
}
