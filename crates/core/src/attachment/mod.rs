//! Resume storage for candidate profiles using Apache OpenDAL.
//!
//! This module owns everything about resume files:
//! - Upload validation (MIME type, file size)
//! - Storage key generation with filename sanitization
//! - Writing, deleting, and probing files on the local filesystem
//!
//! Keys are flat: `{candidate_id}_{sanitized_filename}`. The candidate id
//! prefix guarantees uniqueness; sanitization keeps the original name
//! readable without letting client input shape storage paths.

mod config;
mod error;
mod store;

pub use config::AttachmentConfig;
pub use error::AttachmentError;
pub use store::{AttachmentStore, ResumeUpload};
