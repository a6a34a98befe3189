//! Candidate records and their lifecycle.
//!
//! This module provides the in-memory candidate registry and the service
//! that sequences record creation and deletion against resume storage:
//! - Draft validation (full name, graduation year, experience)
//! - Skill string parsing and filtered listing
//! - Insert, get, delete keyed by generated `Uuid`
//!
//! A record exists in the registry if and only if its resume file exists
//! on disk: creation writes the file before inserting, deletion removes
//! the file before dropping the record.

mod error;
mod service;
mod store;
mod types;

pub use error::CandidateError;
pub use service::CandidateService;
pub use store::CandidateStore;
pub use types::{Candidate, CandidateDraft, CandidateFilter, parse_skills};
