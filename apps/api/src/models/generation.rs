use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::templates::{Language, Template};

/// Request body shared by all three generation endpoints. Fields are optional
/// on the wire so that missing input is reported by the validator, not by the
/// JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub resume_content: Option<String>,
    pub job_description: Option<String>,
    pub template_id: Option<String>,
    pub additional_instructions: Option<String>,
    pub personal_info: Option<PersonalInfo>,
    pub language: Option<Language>,
}

/// Contact details rendered into email and message prompts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub words_count: usize,
    pub generated_at: DateTime<Utc>,
    pub template_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

/// Normalized provider output plus the template that shaped it.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub text: String,
    pub template: &'static Template,
    pub metadata: GenerationMetadata,
}
