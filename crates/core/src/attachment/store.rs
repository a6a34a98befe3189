//! Resume file store implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};
use uuid::Uuid;

use super::config::AttachmentConfig;
use super::error::AttachmentError;

/// An uploaded resume ready to be validated and written to storage.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    /// Original filename as sent by the client, if any.
    pub filename: Option<String>,
    /// Declared MIME type, if any.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub data: Bytes,
}

/// Resume file store backed by the local filesystem.
pub struct AttachmentStore {
    operator: Operator,
    config: AttachmentConfig,
}

impl AttachmentStore {
    /// Open the store, creating the root directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be created or the
    /// storage backend cannot be initialized.
    pub fn open(config: AttachmentConfig) -> Result<Self, AttachmentError> {
        std::fs::create_dir_all(&config.root)
            .map_err(|e| AttachmentError::configuration(e.to_string()))?;

        let root = config
            .root
            .to_str()
            .ok_or_else(|| AttachmentError::configuration("invalid root path"))?;
        let builder = services::Fs::default().root(root);

        let operator = Operator::new(builder)
            .map_err(|e| AttachmentError::configuration(e.to_string()))?
            .finish();

        Ok(Self { operator, config })
    }

    /// Validate an upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the MIME type is not allowed or the file
    /// exceeds the maximum size.
    pub fn validate(&self, content_type: Option<&str>, size: u64) -> Result<(), AttachmentError> {
        // Check MIME type first: a rejected type is reported as such even
        // when the file is also oversized.
        let mime_type = content_type.unwrap_or("");
        if !self.config.is_mime_type_allowed(mime_type) {
            return Err(AttachmentError::unsupported_type(mime_type));
        }

        if size > self.config.max_file_size {
            return Err(AttachmentError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        Ok(())
    }

    /// Generate the storage key for a candidate's resume.
    ///
    /// Format: `{candidate_id}_{sanitized_filename}`. Falls back to
    /// `resume` when the client sent no usable filename.
    #[must_use]
    pub fn storage_key(candidate_id: Uuid, filename: Option<&str>) -> String {
        let sanitized = filename.map(sanitize_filename).unwrap_or_default();
        let name = if sanitized.is_empty() {
            "resume".to_string()
        } else {
            sanitized
        };

        format!("{candidate_id}_{name}")
    }

    /// Validate and write a resume, returning its storage key.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the file cannot be written.
    pub async fn store(
        &self,
        candidate_id: Uuid,
        upload: &ResumeUpload,
    ) -> Result<String, AttachmentError> {
        self.validate(upload.content_type.as_deref(), upload.data.len() as u64)?;

        let key = Self::storage_key(candidate_id, upload.filename.as_deref());
        self.operator
            .write(&key, upload.data.clone())
            .await
            .map_err(AttachmentError::from)?;

        Ok(key)
    }

    /// Delete a resume from storage. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn remove(&self, key: &str) -> Result<(), AttachmentError> {
        self.operator.delete(key).await.map_err(AttachmentError::from)
    }

    /// Check if a resume exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(_) => false,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &AttachmentConfig {
        &self.config
    }
}

/// Sanitize filename for use in a storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and
/// underscores; everything else becomes an underscore.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
