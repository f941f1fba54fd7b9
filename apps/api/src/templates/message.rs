// Recruiter direct-message catalog. A single casual Hebrew template.

use super::{ContentType, Language, Template};

pub const DEFAULT_ID: &str = "message-casual";

pub static TEMPLATES: &[Template] = &[Template {
    id: "message-casual",
    name: "Casual Recruiter Message",
    description: "Short, friendly Hebrew message for LinkedIn or direct messaging",
    content_type: ContentType::Message,
    language: Language::Hebrew,
    tone: "casual, friendly, conversational in Hebrew",
    structure: &[
        "Casual Hebrew greeting with recruiter name",
        "Brief self-introduction with name",
        "Mention of specific job post or opportunity",
        "Quick background highlights (military/education)",
        "Current work status if relevant",
        "Polite request to send CV",
        "Thank you and casual closing",
    ],
    instruction: "Create a casual, friendly message in Hebrew for contacting recruiters on \
        LinkedIn or direct messaging. The message should be conversational, not formal, and \
        written in modern colloquial Hebrew as used in Israeli tech industry communications.",
    platform: Some("LinkedIn/Direct Message"),
}];
