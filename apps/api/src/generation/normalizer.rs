//! Response normalization — turns raw provider text into a `GenerationResult`.

use chrono::Utc;

use crate::errors::AppError;
use crate::models::generation::{GenerationMetadata, GenerationResult};
use crate::templates::{Language, Template};

/// Words separated by single spaces. Deliberately crude: runs of spaces and
/// newlines are not collapsed, matching what clients already display.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Trims the raw text, rejects empty output, and stamps generation metadata.
pub fn normalize(
    raw: &str,
    template: &'static Template,
    language: Option<Language>,
) -> Result<GenerationResult, AppError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(AppError::EmptyGeneration(template.content_type));
    }

    Ok(GenerationResult {
        text: text.to_string(),
        template,
        metadata: GenerationMetadata {
            words_count: word_count(text),
            generated_at: Utc::now(),
            template_used: template.id.to_string(),
            language,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{get_template, ContentType};

    #[test]
    fn test_trims_and_counts_words() {
        let t = get_template(ContentType::CoverLetter, None);
        let result = normalize("  Hello world  ", t, None).unwrap();
        assert_eq!(result.text, "Hello world");
        assert_eq!(result.metadata.words_count, 2);
        assert_eq!(result.metadata.template_used, "professional");
        assert!(result.metadata.language.is_none());
    }

    #[test]
    fn test_empty_and_whitespace_rejected() {
        let t = get_template(ContentType::Email, None);
        for raw in ["", "   ", "\n\t \n"] {
            match normalize(raw, t, Some(Language::English)) {
                Err(AppError::EmptyGeneration(ct)) => assert_eq!(ct, ContentType::Email),
                other => panic!("expected empty generation, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_word_count_is_single_space_split() {
        assert_eq!(word_count("one  two"), 3);
        assert_eq!(word_count("line one\nline two"), 3);
        assert_eq!(word_count("שלום עולם"), 2);
    }

    #[test]
    fn test_template_used_is_resolved_id() {
        let t = get_template(ContentType::Message, Some("no-such-template"));
        let result = normalize("אהלן", t, Some(Language::Hebrew)).unwrap();
        assert_eq!(result.metadata.template_used, "message-casual");
        assert_eq!(result.metadata.language, Some(Language::Hebrew));
    }

    #[test]
    fn test_generated_at_is_now() {
        let before = Utc::now();
        let t = get_template(ContentType::CoverLetter, None);
        let result = normalize("Dear team", t, None).unwrap();
        assert!(result.metadata.generated_at >= before);
        assert!(result.metadata.generated_at <= Utc::now());
    }
}
