//! # Downloadable Result Artifact
//!
//! The generated code is offered as a UTF-8 `.sql` file.

use crate::constants::{ARTIFACT_FILE_NAME, ARTIFACT_MIME};
use crate::errors::PromptError;
use std::path::{Path, PathBuf};
use tracing::info;

/// A generated file ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Wraps the trimmed `code` in a `consulta.sql` artifact.
    pub fn from_code(code: &str) -> Self {
        Self {
            file_name: ARTIFACT_FILE_NAME.to_string(),
            mime: ARTIFACT_MIME.to_string(),
            bytes: code.trim().as_bytes().to_vec(),
        }
    }

    /// Writes the artifact. A directory target receives the default file name.
    pub async fn write_to(&self, target: &Path) -> Result<PathBuf, PromptError> {
        let path = if tokio::fs::metadata(target)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            target.join(&self.file_name)
        } else {
            target.to_path_buf()
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &self.bytes).await?;
        info!("Wrote {} bytes to '{}'.", self.bytes.len(), path.display());
        Ok(path)
    }
}
