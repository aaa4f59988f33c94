use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::Error;

/// Ephemeral directory owned by exactly one execution.
///
/// Generated sources, input files and compiled artifacts live here, and it is
/// the working directory of every process spawned for the request. The
/// directory is removed recursively when the workspace is dropped, whatever
/// path the execution took to get there.
pub struct Workspace {
    root_dir: PathBuf,
    id: String,
}

impl Workspace {
    /// Create a fresh workspace directory under `parent`
    pub async fn create(parent: &Path) -> Result<Self, Error> {
        let id = Uuid::new_v4().to_string();
        let root_dir = parent.join(format!("codesnap-{}", id));

        fs::create_dir_all(&root_dir)
            .await
            .map_err(|e| Error::Workspace(format!("Failed to create workspace directory: {}", e)))?;

        debug!("Created workspace {}", root_dir.display());
        Ok(Self { root_dir, id })
    }

    pub fn path(&self) -> &Path {
        &self.root_dir
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Write a generated file into the workspace root
    pub async fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf, Error> {
        let path = self.root_dir.join(name);
        fs::write(&path, contents)
            .await
            .map_err(|e| Error::Workspace(format!("Failed to write {}: {}", name, e)))?;
        Ok(path)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.root_dir) {
            Ok(()) => debug!("Removed workspace {}", self.root_dir.display()),
            Err(e) => error!(
                "Failed to clean up workspace {}: {}",
                self.root_dir.display(),
                e
            ),
        }
    }
}
