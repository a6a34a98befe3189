//! Core business logic for Talentpool.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! All domain types, validation rules, and storage live here.
//!
//! # Modules
//!
//! - `candidate` - Candidate records, validation, and the in-memory registry
//! - `attachment` - Resume file storage on the local filesystem

pub mod attachment;
pub mod candidate;
