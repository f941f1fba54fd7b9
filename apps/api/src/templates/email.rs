// Job-interest email catalog. English and Hebrew variants plus the four style variants.

use super::{ContentType, Language, Template};

pub const DEFAULT_ID: &str = "email-english";

pub static TEMPLATES: &[Template] = &[
    Template {
        id: "email-english",
        name: "Professional Email (English)",
        description: "Concise professional email for English-speaking recruiters",
        content_type: ContentType::Email,
        language: Language::English,
        tone: "professional, concise, and respectful",
        structure: &[
            "Professional greeting with recruiter name",
            "Brief introduction and position interest",
            "Key qualifications summary",
            "Relevant experience highlights",
            "Enthusiasm for the company/role",
            "Call to action and contact information",
            "Professional closing",
        ],
        instruction: "Create a professional email expressing interest in a job position. \
            The email should be concise (150-200 words), professional, and include personal \
            contact information. Follow this structure and tone.",
        platform: None,
    },
    Template {
        id: "email-hebrew",
        name: "Professional Email (Hebrew)",
        description: "Formal business email written entirely in Hebrew",
        content_type: ContentType::Email,
        language: Language::Hebrew,
        tone: "professional, respectful, formal in Hebrew",
        structure: &[
            "Professional Hebrew greeting",
            "Position interest statement",
            "Brief background summary",
            "Key qualifications",
            "Company enthusiasm",
            "Contact information",
            "Professional Hebrew closing",
        ],
        instruction: "Create a professional email in Hebrew expressing interest in a job \
            position. The email should be formal, respectful, and concise (150-200 words). \
            Include personal contact information and maintain professional Hebrew language \
            throughout.",
        platform: None,
    },
    Template {
        id: "professional",
        name: "Professional Email",
        description: "Formal email for corporate positions",
        content_type: ContentType::Email,
        language: Language::English,
        tone: "formal, business-focused, and structured",
        structure: &[
            "Formal greeting",
            "Clear position interest",
            "Relevant qualifications",
            "Professional experience",
            "Company knowledge",
            "Next steps request",
            "Professional signature",
        ],
        instruction: "Create a formal professional email for job interest. Use business \
            language, be concise but comprehensive, and maintain a respectful tone throughout.",
        platform: None,
    },
    Template {
        id: "creative",
        name: "Creative Email",
        description: "Engaging email for design and creative roles",
        content_type: ContentType::Email,
        language: Language::English,
        tone: "engaging, personality-driven while professional",
        structure: &[
            "Engaging opening",
            "Creative position interest",
            "Portfolio/creative highlights",
            "Passion demonstration",
            "Cultural fit emphasis",
            "Enthusiastic closing",
        ],
        instruction: "Create an engaging email for creative positions. Show personality while \
            maintaining professionalism. Highlight creative achievements and demonstrate \
            passion for the field.",
        platform: None,
    },
    Template {
        id: "technical",
        name: "Technical Email",
        description: "Precise email for engineering positions",
        content_type: ContentType::Email,
        language: Language::English,
        tone: "technical, precise, and solution-oriented",
        structure: &[
            "Technical greeting",
            "Position and technical interest",
            "Relevant technologies",
            "Technical achievements",
            "Problem-solving examples",
            "Technical collaboration interest",
        ],
        instruction: "Create a technical email emphasizing programming skills and technical \
            expertise. Include relevant technologies and quantifiable achievements.",
        platform: None,
    },
    Template {
        id: "startup",
        name: "Startup Email",
        description: "Energetic email for fast-paced startups",
        content_type: ContentType::Email,
        language: Language::English,
        tone: "energetic, growth-minded, and adaptable",
        structure: &[
            "Energetic opening",
            "Startup position interest",
            "Adaptability examples",
            "Growth mindset demonstration",
            "Mission alignment",
            "Excited closing",
        ],
        instruction: "Create an energetic email for startup positions. Emphasize adaptability, \
            growth mindset, and excitement for innovation and fast-paced environments.",
        platform: None,
    },
];
