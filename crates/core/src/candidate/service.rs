//! Candidate lifecycle service.

use std::sync::Arc;

use uuid::Uuid;

use crate::attachment::{AttachmentStore, ResumeUpload};

use super::error::CandidateError;
use super::store::CandidateStore;
use super::types::{Candidate, CandidateDraft, CandidateFilter, parse_skills};

/// Service sequencing candidate operations across the registry and the
/// resume store.
///
/// The record/file invariant lives here: a record is inserted only after
/// its resume is on disk, and the file is removed before the record is
/// dropped. A failure in either file step leaves no mismatched state.
pub struct CandidateService {
    registry: Arc<CandidateStore>,
    attachments: Arc<AttachmentStore>,
}

impl CandidateService {
    /// Create a new candidate service.
    #[must_use]
    pub fn new(registry: Arc<CandidateStore>, attachments: Arc<AttachmentStore>) -> Self {
        Self {
            registry,
            attachments,
        }
    }

    /// Create a candidate record with its resume.
    ///
    /// Sequencing: validate the draft, validate and write the resume,
    /// then insert the record. Insertion is infallible, so a stored file
    /// always gains its record.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range fields, or an
    /// attachment error when the resume is rejected or cannot be written.
    pub async fn create(
        &self,
        draft: CandidateDraft,
        resume: ResumeUpload,
    ) -> Result<Candidate, CandidateError> {
        draft.validate()?;

        let id = Uuid::new_v4();
        let resume_filename = self.attachments.store(id, &resume).await?;

        let candidate = Candidate {
            id,
            full_name: draft.full_name,
            dob: draft.dob,
            contact_number: draft.contact_number,
            contact_address: draft.contact_address,
            education: draft.education,
            graduation_year: draft.graduation_year,
            experience_years: draft.experience_years,
            skills: parse_skills(&draft.skills),
            resume_filename,
        };

        self.registry.insert(candidate.clone());
        Ok(candidate)
    }

    /// List candidates matching the filter, in insertion order.
    #[must_use]
    pub fn list(&self, filter: &CandidateFilter) -> Vec<Candidate> {
        self.registry.list(filter)
    }

    /// Fetch a candidate by id.
    ///
    /// # Errors
    ///
    /// Returns `CandidateError::NotFound` if the id is unknown.
    pub fn get(&self, id: Uuid) -> Result<Candidate, CandidateError> {
        self.registry.get(id).ok_or(CandidateError::NotFound(id))
    }

    /// Delete a candidate and its resume file.
    ///
    /// The file is removed before the record, so a failed file delete
    /// leaves both in place rather than stranding a record without a file.
    ///
    /// # Errors
    ///
    /// Returns `CandidateError::NotFound` if the id is unknown, or an
    /// attachment error if the file cannot be deleted.
    pub async fn delete(&self, id: Uuid) -> Result<(), CandidateError> {
        let candidate = self.get(id)?;

        self.attachments.remove(&candidate.resume_filename).await?;
        self.registry.remove(id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::{AttachmentConfig, AttachmentError};
    use bytes::Bytes;
    use chrono::NaiveDate;

    fn make_service() -> (CandidateService, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let attachments = AttachmentStore::open(AttachmentConfig::new(dir.path()))
            .expect("should open attachment store");
        let service = CandidateService::new(
            Arc::new(CandidateStore::new()),
            Arc::new(attachments),
        );
        (service, dir)
    }

    fn make_draft(full_name: &str, skills: &str) -> CandidateDraft {
        CandidateDraft {
            full_name: full_name.to_string(),
            dob: NaiveDate::from_ymd_opt(1993, 7, 21).expect("valid date"),
            contact_number: "+62-812-0000-0000".to_string(),
            contact_address: "Surabaya".to_string(),
            education: "BSc Computer Science".to_string(),
            graduation_year: 2015,
            experience_years: 6,
            skills: skills.to_string(),
        }
    }

    fn pdf_resume(filename: &str) -> ResumeUpload {
        ResumeUpload {
            filename: Some(filename.to_string()),
            content_type: Some("application/pdf".to_string()),
            data: Bytes::from_static(b"%PDF-1.4 resume body"),
        }
    }

    #[tokio::test]
    async fn test_create_builds_record_and_writes_file() {
        let (service, dir) = make_service();

        let candidate = service
            .create(make_draft("Grace Hopper", "Python, Go, SQL"), pdf_resume("cv.pdf"))
            .await
            .expect("create should succeed");

        assert_eq!(candidate.full_name, "Grace Hopper");
        assert_eq!(candidate.skills, vec!["python", "go", "sql"]);
        assert_eq!(candidate.resume_filename, format!("{}_cv.pdf", candidate.id));
        assert!(dir.path().join(&candidate.resume_filename).exists());

        let fetched = service.get(candidate.id).expect("get should succeed");
        assert_eq!(fetched, candidate);
    }

    #[tokio::test]
    async fn test_create_generates_unique_ids() {
        let (service, _dir) = make_service();
        let mut ids = std::collections::HashSet::new();

        for i in 0..10 {
            let candidate = service
                .create(make_draft(&format!("Candidate {i}"), "rust"), pdf_resume("cv.pdf"))
                .await
                .expect("create should succeed");
            assert!(ids.insert(candidate.id));
        }

        assert_eq!(service.list(&CandidateFilter::default()).len(), 10);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft_without_side_effects() {
        let (service, dir) = make_service();

        let mut draft = make_draft("Grace Hopper", "python");
        draft.graduation_year = 1899;

        let err = service
            .create(draft, pdf_resume("cv.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, CandidateError::GraduationYearTooEarly(1899)));

        assert!(service.list(&CandidateFilter::default()).is_empty());
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .expect("should read dir")
            .collect();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_content_type_without_side_effects() {
        let (service, dir) = make_service();

        let resume = ResumeUpload {
            filename: Some("cv.txt".to_string()),
            content_type: Some("text/plain".to_string()),
            data: Bytes::from_static(b"plain text"),
        };

        let err = service
            .create(make_draft("Grace Hopper", "python"), resume)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CandidateError::Attachment(AttachmentError::UnsupportedType { .. })
        ));

        assert!(service.list(&CandidateFilter::default()).is_empty());
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .expect("should read dir")
            .collect();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let (service, _dir) = make_service();
        let id = Uuid::new_v4();

        let err = service.get(id).unwrap_err();
        assert!(matches!(err, CandidateError::NotFound(got) if got == id));
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_file() {
        let (service, dir) = make_service();

        let candidate = service
            .create(make_draft("Grace Hopper", "python"), pdf_resume("cv.pdf"))
            .await
            .expect("create should succeed");
        let file_path = dir.path().join(&candidate.resume_filename);
        assert!(file_path.exists());

        service
            .delete(candidate.id)
            .await
            .expect("delete should succeed");

        assert!(!file_path.exists());
        assert!(matches!(
            service.get(candidate.id),
            Err(CandidateError::NotFound(_))
        ));

        // Deleting again reports not found.
        let err = service.delete(candidate.id).await.unwrap_err();
        assert!(matches!(err, CandidateError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let (service, _dir) = make_service();

        let err = service.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, CandidateError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_filters_by_skill() {
        let (service, _dir) = make_service();

        let pythonist = service
            .create(make_draft("Pythonist", "Python, Django"), pdf_resume("a.pdf"))
            .await
            .expect("create should succeed");
        service
            .create(make_draft("Rustacean", "Rust, Tokio"), pdf_resume("b.pdf"))
            .await
            .expect("create should succeed");

        let filter = CandidateFilter {
            skill: Some("python".to_string()),
            ..CandidateFilter::default()
        };
        let listed = service.list(&filter);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, pythonist.id);

        let filter = CandidateFilter {
            skill: Some("cobol".to_string()),
            ..CandidateFilter::default()
        };
        assert!(service.list(&filter).is_empty());
    }
}
