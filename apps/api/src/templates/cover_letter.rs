// Cover letter catalog.

use super::{ContentType, Language, Template};

pub const DEFAULT_ID: &str = "professional";

pub static TEMPLATES: &[Template] = &[
    Template {
        id: "professional",
        name: "Professional",
        description: "Clean and formal tone perfect for corporate positions",
        content_type: ContentType::CoverLetter,
        language: Language::English,
        tone: "formal, respectful, and business-focused",
        structure: &[
            "Professional greeting",
            "Opening statement with position interest",
            "Relevant experience and achievements",
            "Skills alignment with job requirements",
            "Company knowledge and enthusiasm",
            "Call to action and closing",
        ],
        instruction: "Create a professional cover letter with a formal tone. \
            Use business language, maintain proper structure, and focus on achievements \
            and qualifications. Be respectful and concise.",
        platform: None,
    },
    Template {
        id: "creative",
        name: "Creative",
        description: "Engaging style for design and creative roles",
        content_type: ContentType::CoverLetter,
        language: Language::English,
        tone: "innovative, personality-driven, and expressive",
        structure: &[
            "Creative opening hook",
            "Passion for the industry/company",
            "Portfolio highlights and creative achievements",
            "Problem-solving approach",
            "Cultural fit and collaboration style",
            "Enthusiastic closing",
        ],
        instruction: "Create a creative cover letter that shows personality while remaining \
            professional. Use engaging language, highlight creative achievements, and \
            demonstrate passion for the field.",
        platform: None,
    },
    Template {
        id: "technical",
        name: "Technical",
        description: "Detailed approach for engineering positions",
        content_type: ContentType::CoverLetter,
        language: Language::English,
        tone: "technical, precise, and solution-oriented",
        structure: &[
            "Technical introduction",
            "Relevant technologies and frameworks",
            "Project achievements and metrics",
            "Problem-solving examples",
            "Technical leadership or collaboration",
            "Interest in technical challenges",
        ],
        instruction: "Create a technical cover letter that emphasizes programming skills, \
            technologies, and engineering achievements. Use precise language and include \
            relevant technical details and metrics.",
        platform: None,
    },
    Template {
        id: "startup",
        name: "Startup",
        description: "Dynamic tone for fast-paced environments",
        content_type: ContentType::CoverLetter,
        language: Language::English,
        tone: "energetic, growth-minded, and adaptable",
        structure: &[
            "Energetic opening",
            "Adaptability and quick learning",
            "Growth mindset and achievements",
            "Startup experience or interest",
            "Contribution to company mission",
            "Excited closing with availability",
        ],
        instruction: "Create a startup-focused cover letter with energy and enthusiasm. \
            Emphasize adaptability, growth mindset, and ability to work in fast-paced \
            environments. Show excitement for innovation.",
        platform: None,
    },
];
