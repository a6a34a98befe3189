//! Candidate management routes.
//!
//! Covers the full record lifecycle: multipart creation with an attached
//! resume, filtered listing, fetch by id, and deletion.

use axum::{
    Json, Router,
    extract::{
        Multipart, Path, Query, State,
        multipart::{Field, MultipartError},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use talentpool_core::attachment::{AttachmentError, ResumeUpload};
use talentpool_core::candidate::{
    Candidate, CandidateDraft, CandidateError, CandidateFilter, CandidateService,
};

/// Creates the candidate routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/candidates", post(create_candidate))
        .route("/candidates", get(list_candidates))
        .route("/candidates/{id}", get(get_candidate))
        .route("/candidates/{id}", delete(delete_candidate))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing candidates.
#[derive(Debug, Deserialize)]
pub struct ListCandidatesQuery {
    /// Filter by skill token (case-insensitive exact match).
    pub skill: Option<String>,
    /// Filter by exact years of experience.
    pub experience: Option<i32>,
    /// Filter by exact graduation year.
    pub graduation_year: Option<i32>,
}

/// Response for a candidate record.
#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    /// Candidate ID.
    pub id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Date of birth (ISO 8601 date).
    pub dob: NaiveDate,
    /// Contact phone number.
    pub contact_number: String,
    /// Contact address.
    pub contact_address: String,
    /// Highest education attained.
    pub education: String,
    /// Year of graduation.
    pub graduation_year: i32,
    /// Years of professional experience.
    pub experience_years: i32,
    /// Lowercased skill tokens.
    pub skills: Vec<String>,
    /// Stored resume filename.
    pub resume_filename: String,
}

impl From<Candidate> for CandidateResponse {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            full_name: candidate.full_name,
            dob: candidate.dob,
            contact_number: candidate.contact_number,
            contact_address: candidate.contact_address,
            education: candidate.education,
            graduation_year: candidate.graduation_year,
            experience_years: candidate.experience_years,
            skills: candidate.skills,
            resume_filename: candidate.resume_filename,
        }
    }
}

// ============================================================================
// Multipart Form Decoding
// ============================================================================

/// Errors while decoding the candidate multipart form.
#[derive(Debug, Error)]
enum FormError {
    /// A required form field was absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A form field could not be parsed into its target type.
    #[error("invalid value for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// The multipart stream itself was malformed or unreadable.
    #[error("malformed multipart request: {0}")]
    Multipart(#[from] MultipartError),
}

/// Read a text field and parse it into its target type.
async fn parse_field<T>(name: &'static str, field: Field<'_>) -> Result<T, FormError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = field.text().await?;
    raw.trim().parse().map_err(|e: T::Err| FormError::InvalidField {
        field: name,
        reason: e.to_string(),
    })
}

/// Decode the candidate creation form into a draft and a resume upload.
///
/// Unknown fields are ignored; missing required fields are reported after
/// the whole stream has been read.
async fn read_candidate_form(
    mut multipart: Multipart,
) -> Result<(CandidateDraft, ResumeUpload), FormError> {
    let mut full_name: Option<String> = None;
    let mut dob: Option<NaiveDate> = None;
    let mut contact_number: Option<String> = None;
    let mut contact_address: Option<String> = None;
    let mut education: Option<String> = None;
    let mut graduation_year: Option<i32> = None;
    let mut experience_years: Option<i32> = None;
    let mut skills: Option<String> = None;
    let mut resume: Option<ResumeUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        match name.as_str() {
            "full_name" => full_name = Some(field.text().await?),
            "dob" => dob = Some(parse_field("dob", field).await?),
            "contact_number" => contact_number = Some(field.text().await?),
            "contact_address" => contact_address = Some(field.text().await?),
            "education" => education = Some(field.text().await?),
            "graduation_year" => {
                graduation_year = Some(parse_field("graduation_year", field).await?);
            }
            "experience_years" => {
                experience_years = Some(parse_field("experience_years", field).await?);
            }
            "skills" => skills = Some(field.text().await?),
            "resume" => {
                resume = Some(ResumeUpload {
                    filename: field.file_name().map(ToString::to_string),
                    content_type: field.content_type().map(ToString::to_string),
                    data: field.bytes().await?,
                });
            }
            _ => {}
        }
    }

    let draft = CandidateDraft {
        full_name: full_name.ok_or(FormError::MissingField("full_name"))?,
        dob: dob.ok_or(FormError::MissingField("dob"))?,
        contact_number: contact_number.ok_or(FormError::MissingField("contact_number"))?,
        contact_address: contact_address.ok_or(FormError::MissingField("contact_address"))?,
        education: education.ok_or(FormError::MissingField("education"))?,
        graduation_year: graduation_year.ok_or(FormError::MissingField("graduation_year"))?,
        experience_years: experience_years.ok_or(FormError::MissingField("experience_years"))?,
        skills: skills.ok_or(FormError::MissingField("skills"))?,
    };
    let resume = resume.ok_or(FormError::MissingField("resume"))?;

    Ok((draft, resume))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// 404 response for an id that names no stored candidate.
///
/// Path ids arrive as plain strings; one that is not a UUID can never name
/// a record and maps to the same 404 as an unknown UUID.
fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Candidate not found"
        })),
    )
        .into_response()
}

/// Map a form decoding error to its HTTP response.
fn form_error_response(err: &FormError) -> Response {
    let (status, code) = match err {
        FormError::MissingField(_) => (StatusCode::UNPROCESSABLE_ENTITY, "missing_field"),
        FormError::InvalidField { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_field"),
        FormError::Multipart(_) => (StatusCode::BAD_REQUEST, "invalid_multipart"),
    };

    (
        status,
        Json(json!({
            "error": code,
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Map a candidate error to its HTTP response.
fn candidate_error_response(err: &CandidateError) -> Response {
    match err {
        CandidateError::NotFound(_) => not_found_response(),
        CandidateError::MissingFullName
        | CandidateError::GraduationYearTooEarly(_)
        | CandidateError::NegativeExperience(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "validation_error",
                "message": err.to_string()
            })),
        )
            .into_response(),
        CandidateError::Attachment(AttachmentError::UnsupportedType { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_resume_type",
                "message": "Invalid resume file type"
            })),
        )
            .into_response(),
        CandidateError::Attachment(AttachmentError::FileTooLarge { size, max }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "file_too_large",
                "message": format!("Resume is {size} bytes; the maximum is {max} bytes")
            })),
        )
            .into_response(),
        CandidateError::Attachment(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/candidates`
/// Create a candidate from a multipart form with an attached resume.
async fn create_candidate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let (draft, resume) = match read_candidate_form(multipart).await {
        Ok(parts) => parts,
        Err(e) => {
            error!(error = %e, "Failed to decode candidate form");
            return form_error_response(&e);
        }
    };

    let service = CandidateService::new(state.registry.clone(), state.attachments.clone());

    match service.create(draft, resume).await {
        Ok(candidate) => {
            info!(candidate_id = %candidate.id, "Candidate created");
            (StatusCode::OK, Json(CandidateResponse::from(candidate))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create candidate");
            candidate_error_response(&e)
        }
    }
}

/// GET `/candidates`
/// List candidates, filtered by any combination of skill, experience,
/// and graduation year.
async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<ListCandidatesQuery>,
) -> impl IntoResponse {
    let filter = CandidateFilter {
        // An empty skill parameter means "no filter".
        skill: query.skill.filter(|s| !s.is_empty()),
        experience_years: query.experience,
        graduation_year: query.graduation_year,
    };

    let service = CandidateService::new(state.registry.clone(), state.attachments.clone());
    let candidates: Vec<CandidateResponse> = service
        .list(&filter)
        .into_iter()
        .map(CandidateResponse::from)
        .collect();

    Json(candidates)
}

/// GET `/candidates/{id}`
/// Fetch a single candidate by id.
async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Ok(id) = Uuid::parse_str(&id) else {
        return not_found_response();
    };

    let service = CandidateService::new(state.registry.clone(), state.attachments.clone());

    match service.get(id) {
        Ok(candidate) => (StatusCode::OK, Json(CandidateResponse::from(candidate))).into_response(),
        Err(e) => {
            error!(error = %e, candidate_id = %id, "Failed to fetch candidate");
            candidate_error_response(&e)
        }
    }
}

/// DELETE `/candidates/{id}`
/// Delete a candidate and its stored resume.
async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Ok(id) = Uuid::parse_str(&id) else {
        return not_found_response();
    };

    let service = CandidateService::new(state.registry.clone(), state.attachments.clone());

    match service.delete(id).await {
        Ok(()) => {
            info!(candidate_id = %id, "Candidate deleted");
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Candidate and resume deleted successfully"
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, candidate_id = %id, "Failed to delete candidate");
            candidate_error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn make_candidate() -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            full_name: "Ada Lovelace".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 12, 10).expect("valid date"),
            contact_number: "+62-812-0000-0000".to_string(),
            contact_address: "Jakarta".to_string(),
            education: "BSc Computer Science".to_string(),
            graduation_year: 2012,
            experience_years: 5,
            skills: vec!["python".to_string(), "go".to_string()],
            resume_filename: "id_cv.pdf".to_string(),
        }
    }

    #[test]
    fn test_candidate_response_from_candidate() {
        let candidate = make_candidate();
        let response = CandidateResponse::from(candidate.clone());

        assert_eq!(response.id, candidate.id);
        assert_eq!(response.full_name, candidate.full_name);
        assert_eq!(response.dob, candidate.dob);
        assert_eq!(response.skills, candidate.skills);
        assert_eq!(response.resume_filename, candidate.resume_filename);
    }

    #[test]
    fn test_not_found_response_status() {
        assert_eq!(not_found_response().status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case(FormError::MissingField("resume"), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(
        FormError::InvalidField { field: "dob", reason: "bad date".to_string() },
        StatusCode::UNPROCESSABLE_ENTITY
    )]
    fn test_form_error_status(#[case] err: FormError, #[case] expected: StatusCode) {
        assert_eq!(form_error_response(&err).status(), expected);
    }

    #[rstest]
    #[case(CandidateError::not_found(Uuid::nil()), StatusCode::NOT_FOUND)]
    #[case(CandidateError::MissingFullName, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(CandidateError::GraduationYearTooEarly(1899), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(CandidateError::NegativeExperience(-1), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(
        CandidateError::Attachment(AttachmentError::unsupported_type("text/plain")),
        StatusCode::BAD_REQUEST
    )]
    #[case(
        CandidateError::Attachment(AttachmentError::file_too_large(20, 10)),
        StatusCode::BAD_REQUEST
    )]
    #[case(
        CandidateError::Attachment(AttachmentError::operation("disk on fire")),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn test_candidate_error_status(#[case] err: CandidateError, #[case] expected: StatusCode) {
        assert_eq!(candidate_error_response(&err).status(), expected);
    }
}
