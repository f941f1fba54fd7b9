//! Template Registry — static catalogs of writing templates, one per content type.
//!
//! Catalogs are compiled into the binary and never mutated. Lookups always
//! succeed: an unknown or missing id resolves to the catalog's default.

use std::fmt;

use serde::{Deserialize, Serialize};

mod cover_letter;
mod email;
mod message;

/// What kind of text is being generated. Selects the catalog, the validation
/// rules, and the provider instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    CoverLetter,
    Email,
    Message,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::CoverLetter => "cover-letter",
            ContentType::Email => "email",
            ContentType::Message => "message",
        }
    }

    /// Human-readable noun for user-facing messages.
    pub fn noun(&self) -> &'static str {
        match self {
            ContentType::CoverLetter => "cover letter",
            ContentType::Email => "email",
            ContentType::Message => "message",
        }
    }

    /// Email and message bodies are signed by the applicant, so a name is mandatory.
    pub fn requires_identity(&self) -> bool {
        matches!(self, ContentType::Email | ContentType::Message)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hebrew,
}

impl Language {
    /// Capitalized form used inside prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hebrew => "Hebrew",
        }
    }
}

/// A named tone/structure/instruction bundle used to shape the composed prompt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub content_type: ContentType,
    pub language: Language,
    pub tone: &'static str,
    /// Ordered section labels, joined into the prompt's structural outline.
    pub structure: &'static [&'static str],
    pub instruction: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<&'static str>,
}

/// Returns the full catalog for a content type, default template first.
pub fn templates(content_type: ContentType) -> &'static [Template] {
    match content_type {
        ContentType::CoverLetter => cover_letter::TEMPLATES,
        ContentType::Email => email::TEMPLATES,
        ContentType::Message => message::TEMPLATES,
    }
}

/// Id of the template used when the requested one is absent or unknown.
pub fn default_template_id(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::CoverLetter => cover_letter::DEFAULT_ID,
        ContentType::Email => email::DEFAULT_ID,
        ContentType::Message => message::DEFAULT_ID,
    }
}

/// Looks up a template by id within the content type's catalog.
///
/// Never fails: falls back to the catalog default. Catalogs are separate
/// namespaces, so `"professional"` means different templates for cover
/// letters and emails.
pub fn get_template(content_type: ContentType, id: Option<&str>) -> &'static Template {
    let catalog = templates(content_type);
    let wanted = id.unwrap_or_else(|| default_template_id(content_type));

    catalog
        .iter()
        .find(|t| t.id == wanted)
        .or_else(|| {
            let fallback = default_template_id(content_type);
            catalog.iter().find(|t| t.id == fallback)
        })
        .unwrap_or(&catalog[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ContentType; 3] = [
        ContentType::CoverLetter,
        ContentType::Email,
        ContentType::Message,
    ];

    #[test]
    fn test_unknown_id_falls_back_to_default() {
        for ct in ALL {
            let t = get_template(ct, Some("does-not-exist"));
            assert_eq!(t.id, default_template_id(ct), "fallback for {ct}");
        }
    }

    #[test]
    fn test_missing_id_uses_default() {
        assert_eq!(get_template(ContentType::CoverLetter, None).id, "professional");
        assert_eq!(get_template(ContentType::Email, None).id, "email-english");
        assert_eq!(get_template(ContentType::Message, None).id, "message-casual");
    }

    #[test]
    fn test_default_is_first_in_catalog() {
        for ct in ALL {
            assert_eq!(templates(ct)[0].id, default_template_id(ct));
        }
    }

    #[test]
    fn test_catalogs_are_separate_namespaces() {
        let cl = get_template(ContentType::CoverLetter, Some("professional"));
        let em = get_template(ContentType::Email, Some("professional"));
        assert_eq!(cl.content_type, ContentType::CoverLetter);
        assert_eq!(em.content_type, ContentType::Email);
        assert_ne!(cl.name, em.name);

        // Email ids do not leak into the message catalog.
        let msg = get_template(ContentType::Message, Some("email-hebrew"));
        assert_eq!(msg.id, "message-casual");
    }

    #[test]
    fn test_every_template_is_filed_under_its_content_type() {
        for ct in ALL {
            for t in templates(ct) {
                assert_eq!(t.content_type, ct, "{} misfiled", t.id);
                assert!(!t.structure.is_empty(), "{} has no structure", t.id);
                assert!(!t.instruction.is_empty());
            }
        }
    }

    #[test]
    fn test_ids_unique_within_catalog() {
        for ct in ALL {
            let catalog = templates(ct);
            for (i, a) in catalog.iter().enumerate() {
                assert!(
                    catalog[i + 1..].iter().all(|b| b.id != a.id),
                    "duplicate id {}",
                    a.id
                );
            }
        }
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(templates(ContentType::CoverLetter).len(), 4);
        assert_eq!(templates(ContentType::Email).len(), 6);
        assert_eq!(templates(ContentType::Message).len(), 1);
    }

    #[test]
    fn test_hebrew_templates() {
        assert_eq!(
            get_template(ContentType::Email, Some("email-hebrew")).language,
            Language::Hebrew
        );
        let msg = get_template(ContentType::Message, None);
        assert_eq!(msg.language, Language::Hebrew);
        assert_eq!(msg.platform, Some("LinkedIn/Direct Message"));
    }

    #[test]
    fn test_content_type_wire_names() {
        let ct: ContentType = serde_json::from_str("\"cover-letter\"").unwrap();
        assert_eq!(ct, ContentType::CoverLetter);
        assert_eq!(serde_json::to_string(&ContentType::Email).unwrap(), "\"email\"");
        let lang: Language = serde_json::from_str("\"hebrew\"").unwrap();
        assert_eq!(lang, Language::Hebrew);
    }
}
