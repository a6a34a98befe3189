//! Candidate domain types for record creation and filtering.

use chrono::NaiveDate;
use uuid::Uuid;

use super::error::CandidateError;

/// A stored candidate profile plus the reference to its resume file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Server-generated unique identifier.
    pub id: Uuid,
    /// Candidate's full name.
    pub full_name: String,
    /// Date of birth.
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
    /// Lowercased skill tokens in submission order.
    pub skills: Vec<String>,
    /// Storage key of the uploaded resume.
    pub resume_filename: String,
}

/// Input for creating a new candidate, before validation.
///
/// `skills` is the raw comma-separated string as submitted; it is parsed
/// into tokens when the record is built.
#[derive(Debug, Clone)]
pub struct CandidateDraft {
    /// Candidate's full name.
    pub full_name: String,
    /// Date of birth.
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
    /// Raw comma-separated skills string.
    pub skills: String,
}

impl CandidateDraft {
    /// Earliest accepted graduation year.
    pub const MIN_GRADUATION_YEAR: i32 = 1900;

    /// Validate business constraints on the draft.
    ///
    /// The HTTP layer rejects malformed dates and integers before this
    /// point; this checks the domain rules only.
    ///
    /// # Errors
    ///
    /// Returns an error if the full name is blank, the graduation year is
    /// before 1900, or the experience is negative.
    pub fn validate(&self) -> Result<(), CandidateError> {
        if self.full_name.trim().is_empty() {
            return Err(CandidateError::MissingFullName);
        }

        if self.graduation_year < Self::MIN_GRADUATION_YEAR {
            return Err(CandidateError::GraduationYearTooEarly(self.graduation_year));
        }

        if self.experience_years < 0 {
            return Err(CandidateError::NegativeExperience(self.experience_years));
        }

        Ok(())
    }
}

/// Optional predicates for a list query; provided predicates are ANDed.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    /// Exact skill token to match, case-insensitive.
    pub skill: Option<String>,
    /// Exact years of experience.
    pub experience_years: Option<i32>,
    /// Exact graduation year.
    pub graduation_year: Option<i32>,
}

impl CandidateFilter {
    /// True if the candidate satisfies every provided predicate.
    ///
    /// Skill matching is exact token equality after lowercasing the query,
    /// never substring containment.
    #[must_use]
    pub fn matches(&self, candidate: &Candidate) -> bool {
        if let Some(skill) = &self.skill {
            if !candidate.skills.contains(&skill.to_lowercase()) {
                return false;
            }
        }

        if let Some(experience) = self.experience_years {
            if candidate.experience_years != experience {
                return false;
            }
        }

        if let Some(year) = self.graduation_year {
            if candidate.graduation_year != year {
                return false;
            }
        }

        true
    }
}

/// Split a raw comma-separated skills string into lowercase tokens.
///
/// Each token is trimmed and lowercased with order preserved. Empty tokens
/// are kept when the input produces them, so a trailing comma yields a
/// trailing empty token.
#[must_use]
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_lowercase()).collect()
}
