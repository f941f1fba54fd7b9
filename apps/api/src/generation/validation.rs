//! Request validation — cheap checks run before any paid provider call.
//!
//! Length thresholds are character counts, a heuristic against near-empty
//! submissions rather than a quality gate.

use crate::errors::AppError;
use crate::models::generation::{GenerationRequest, PersonalInfo};
use crate::templates::ContentType;

pub const MIN_RESUME_CHARS: usize = 50;
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 100;

/// The fields of a request that passed validation, borrowed from it.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRequest<'a> {
    pub resume_content: &'a str,
    pub job_description: &'a str,
    pub template_id: Option<&'a str>,
    pub additional_instructions: Option<&'a str>,
    pub personal_info: Option<&'a PersonalInfo>,
    /// Present only when `personal_info` is present and its name is non-blank.
    pub applicant_name: Option<&'a str>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Checks required fields, identity and minimum lengths, in that order.
pub fn validate(
    content_type: ContentType,
    request: &GenerationRequest,
) -> Result<ValidatedRequest<'_>, AppError> {
    let (Some(resume_content), Some(job_description)) = (
        non_blank(&request.resume_content),
        non_blank(&request.job_description),
    ) else {
        return Err(AppError::Validation(
            "Resume content and job description are required".to_string(),
        ));
    };

    let applicant_name = request
        .personal_info
        .as_ref()
        .and_then(|info| non_blank(&info.name));

    if content_type.requires_identity() && applicant_name.is_none() {
        return Err(AppError::Validation(format!(
            "Personal information with name is required for {} generation",
            content_type.noun()
        )));
    }

    if resume_content.chars().count() < MIN_RESUME_CHARS {
        return Err(AppError::Validation(
            "Resume content seems too short. Please provide more details.".to_string(),
        ));
    }

    if job_description.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Err(AppError::Validation(
            "Job description seems too short. Please provide more details.".to_string(),
        ));
    }

    Ok(ValidatedRequest {
        resume_content,
        job_description,
        template_id: non_blank(&request.template_id),
        additional_instructions: non_blank(&request.additional_instructions),
        personal_info: request.personal_info.as_ref(),
        applicant_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(resume_len: usize, jd_len: usize) -> GenerationRequest {
        GenerationRequest {
            resume_content: Some("r".repeat(resume_len)),
            job_description: Some("j".repeat(jd_len)),
            ..Default::default()
        }
    }

    fn with_name(mut req: GenerationRequest, name: &str) -> GenerationRequest {
        req.personal_info = Some(PersonalInfo {
            name: Some(name.to_string()),
            ..Default::default()
        });
        req
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_minimum_lengths_pass() {
        assert!(validate(ContentType::CoverLetter, &request(50, 100)).is_ok());
    }

    #[test]
    fn test_short_resume_rejected() {
        let err = validate(ContentType::CoverLetter, &request(49, 100)).unwrap_err();
        assert!(message(err).contains("Resume content seems too short"));
    }

    #[test]
    fn test_short_job_description_rejected() {
        let err = validate(ContentType::CoverLetter, &request(50, 99)).unwrap_err();
        assert!(message(err).contains("Job description seems too short"));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let req = GenerationRequest {
            resume_content: Some("r".repeat(80)),
            ..Default::default()
        };
        let err = validate(ContentType::CoverLetter, &req).unwrap_err();
        assert_eq!(message(err), "Resume content and job description are required");
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        let req = GenerationRequest {
            resume_content: Some("   ".into()),
            job_description: Some("j".repeat(120)),
            ..Default::default()
        };
        let err = validate(ContentType::CoverLetter, &req).unwrap_err();
        assert!(message(err).contains("are required"));
    }

    #[test]
    fn test_lengths_are_characters_not_bytes() {
        // 50 Hebrew letters are 100 bytes but 50 characters.
        let req = GenerationRequest {
            resume_content: Some("א".repeat(50)),
            job_description: Some("ב".repeat(100)),
            ..Default::default()
        };
        assert!(validate(ContentType::CoverLetter, &req).is_ok());

        let short = GenerationRequest {
            resume_content: Some("א".repeat(49)),
            job_description: Some("ב".repeat(100)),
            ..Default::default()
        };
        assert!(validate(ContentType::CoverLetter, &short).is_err());
    }

    #[test]
    fn test_email_and_message_require_name() {
        for ct in [ContentType::Email, ContentType::Message] {
            let err = validate(ct, &request(60, 120)).unwrap_err();
            assert_eq!(
                message(err),
                format!("Personal information with name is required for {} generation", ct.noun())
            );
            assert!(validate(ct, &with_name(request(60, 120), " ")).is_err());
            assert!(validate(ct, &with_name(request(60, 120), "Dana")).is_ok());
        }
    }

    #[test]
    fn test_cover_letter_does_not_require_name() {
        assert!(validate(ContentType::CoverLetter, &request(60, 120)).is_ok());
    }

    #[test]
    fn test_name_checked_before_lengths() {
        let err = validate(ContentType::Email, &request(10, 10)).unwrap_err();
        assert!(message(err).contains("name is required"));
    }

    #[test]
    fn test_blank_optional_fields_dropped() {
        let mut req = with_name(request(60, 120), "Dana");
        req.template_id = Some("".into());
        req.additional_instructions = Some("  ".into());
        let v = validate(ContentType::Email, &req).unwrap();
        assert_eq!(v.template_id, None);
        assert_eq!(v.additional_instructions, None);
        assert_eq!(v.applicant_name, Some("Dana"));
    }
}
