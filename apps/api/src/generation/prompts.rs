// Prompt composition for the generation endpoints.
//
// Composition is concatenation plus fixed scaffold text: user content is
// inserted verbatim (never truncated or summarized) and nothing time- or
// randomness-dependent goes into the prompt, so identical inputs always give
// byte-identical prompts.
//
// User text is appended with push_str rather than substituted into a
// `{placeholder}` template, so braces inside a résumé are never re-expanded.

use crate::generation::validation::ValidatedRequest;
use crate::templates::{ContentType, Language, Template};

const NOT_PROVIDED: &str = "Not provided";

/// System turn for cover letters.
pub const COVER_LETTER_SYSTEM: &str = "You are an expert career coach and professional \
    cover letter writer. Write polished, specific cover letters grounded only in the \
    candidate's resume. Do NOT invent employers, degrees, or achievements. \
    Return only the letter text.";

/// System turn for English job-interest emails.
pub const EMAIL_SYSTEM_ENGLISH: &str = "You are an expert at writing professional job \
    application emails. Write concise, respectful emails in English grounded only in the \
    candidate's resume. Return only the email text.";

/// System turn for Hebrew job-interest emails.
pub const EMAIL_SYSTEM_HEBREW: &str = "You are an expert at writing professional job \
    application emails in formal business Hebrew. Write the entire email in Hebrew with \
    correct grammar, grounded only in the candidate's resume. Return only the email text.";

/// System turn for casual recruiter messages.
pub const MESSAGE_SYSTEM: &str = "You are an expert at writing casual, friendly messages \
    in modern Israeli Hebrew for reaching out to tech recruiters. Keep it short and \
    natural. Return only the message text, in Hebrew.";

/// Fixed system instruction for a content type (and, for email, the language).
pub fn system_instruction(content_type: ContentType, language: Option<Language>) -> &'static str {
    match (content_type, language) {
        (ContentType::CoverLetter, _) => COVER_LETTER_SYSTEM,
        (ContentType::Email, Some(Language::Hebrew)) => EMAIL_SYSTEM_HEBREW,
        (ContentType::Email, _) => EMAIL_SYSTEM_ENGLISH,
        (ContentType::Message, _) => MESSAGE_SYSTEM,
    }
}

/// Language the output is written in, as reported in response metadata.
///
/// Cover letters carry no language. Emails use the requested language, else
/// the template's own. Messages are always Hebrew.
pub fn effective_language(template: &Template, requested: Option<Language>) -> Option<Language> {
    match template.content_type {
        ContentType::CoverLetter => None,
        ContentType::Email => Some(requested.unwrap_or(template.language)),
        ContentType::Message => Some(Language::Hebrew),
    }
}

/// Builds the full instruction block sent as the user turn.
pub fn compose(template: &Template, request: &ValidatedRequest<'_>, language: Option<Language>) -> String {
    match template.content_type {
        ContentType::CoverLetter => compose_cover_letter(template, request),
        ContentType::Email => {
            compose_email(template, request, language.unwrap_or(template.language))
        }
        ContentType::Message => compose_message(template, request),
    }
}

fn field<'a>(value: &'a Option<String>) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_PROVIDED)
}

fn push_section(prompt: &mut String, heading: &str, body: &str) {
    prompt.push_str(heading);
    prompt.push_str(":\n");
    prompt.push_str(body);
    prompt.push_str("\n\n");
}

fn push_user_content(prompt: &mut String, request: &ValidatedRequest<'_>) {
    push_section(prompt, "RESUME CONTENT", request.resume_content);
    push_section(prompt, "JOB DESCRIPTION", request.job_description);
    if let Some(extra) = request.additional_instructions {
        push_section(prompt, "ADDITIONAL INSTRUCTIONS", extra);
    }
}

fn push_personal_info(prompt: &mut String, request: &ValidatedRequest<'_>, full: bool) {
    let name = request.applicant_name.unwrap_or(NOT_PROVIDED);
    let none = None;
    let (phone, email, linkedin, github) = match request.personal_info {
        Some(info) => (&info.phone, &info.email, &info.linkedin, &info.github),
        None => (&none, &none, &none, &none),
    };

    prompt.push_str("PERSONAL INFORMATION:\n");
    prompt.push_str(&format!("Name: {name}\n"));
    prompt.push_str(&format!("Phone: {}\n", field(phone)));
    prompt.push_str(&format!("Email: {}\n", field(email)));
    if full {
        prompt.push_str(&format!("LinkedIn: {}\n", field(linkedin)));
        prompt.push_str(&format!("GitHub: {}\n", field(github)));
    }
    prompt.push('\n');
}

fn compose_cover_letter(template: &Template, request: &ValidatedRequest<'_>) -> String {
    let mut prompt = format!(
        "You are an expert cover letter writer. Create a compelling cover letter using the {name} template.\n\n\
         TEMPLATE REQUIREMENTS:\n\
         - Style: {description}\n\
         - Tone: {tone}\n\
         - Structure: {structure}\n\n",
        name = template.name,
        description = template.description,
        tone = template.tone,
        structure = template.structure.join(", "),
    );
    push_section(&mut prompt, "INSTRUCTIONS", template.instruction);
    push_user_content(&mut prompt, request);

    prompt.push_str(
        "REQUIREMENTS:\n\
         1. Write a complete cover letter (300-400 words)\n\
         2. Personalize it based on the job description\n\
         3. Highlight relevant experience from the resume\n\
         4. Use the specified tone and style\n\
         5. Include specific examples and achievements\n\
         6. Make it compelling and unique\n\
         7. End with a strong call to action\n\n\
         Generate only the cover letter content, no explanations or metadata.\n",
    );
    prompt
}

fn compose_email(template: &Template, request: &ValidatedRequest<'_>, language: Language) -> String {
    let hebrew = language == Language::Hebrew;
    let lang = language.display_name();

    let mut prompt = format!(
        "You are an expert at writing professional job application emails. \
         Create a compelling email expressing interest in a job position.\n\n\
         TEMPLATE REQUIREMENTS:\n\
         - Style: {name}\n\
         - Language: {lang}\n\
         - Tone: {tone}\n\
         - Structure: {structure}\n\n",
        name = template.name,
        tone = template.tone,
        structure = template.structure.join(", "),
    );
    push_section(&mut prompt, "INSTRUCTIONS", template.instruction);

    if hebrew {
        prompt.push_str(
            "IMPORTANT: Write the entire email in Hebrew. \
             Use proper Hebrew grammar and formal business language.\n\n",
        );
    }

    push_personal_info(&mut prompt, request, true);
    push_user_content(&mut prompt, request);

    prompt.push_str(&format!(
        "REQUIREMENTS:\n\
         1. Write a complete professional email (150-200 words)\n\
         2. Include appropriate greeting (use recruiter name if mentioned in job description)\n\
         3. Express clear interest in the specific position\n\
         4. Highlight relevant experience from the resume\n\
         5. Include the person's contact information naturally\n\
         6. Use {lang} language throughout\n\
         7. End with a professional closing\n\
         8. Make it personal and compelling\n\n"
    ));

    prompt.push_str(if hebrew {
        "Generate the email in Hebrew only. Use formal Hebrew business language.\n\n"
    } else {
        "Generate the email in English with professional business language.\n\n"
    });
    prompt.push_str("Generate only the email content, no explanations or metadata.\n");
    prompt
}

fn compose_message(template: &Template, request: &ValidatedRequest<'_>) -> String {
    let mut prompt = format!(
        "You are an expert at writing casual, friendly messages in Hebrew for recruiting \
         communications in Israel's tech industry.\n\n\
         TEMPLATE REQUIREMENTS:\n\
         - Style: {name}\n\
         - Platform: {platform}\n\
         - Language: Hebrew (colloquial, modern Israeli Hebrew)\n\
         - Tone: {tone}\n\
         - Structure: {structure}\n\n",
        name = template.name,
        platform = template.platform.unwrap_or(NOT_PROVIDED),
        tone = template.tone,
        structure = template.structure.join(", "),
    );
    push_section(&mut prompt, "INSTRUCTIONS", template.instruction);

    prompt.push_str(
        "IMPORTANT:\n\
         - Write in casual, modern Hebrew as used in Israeli tech/startup industry\n\
         - Use informal language but remain respectful\n\
         - Keep it brief and conversational (80-120 words)\n\
         - Include natural Hebrew expressions like \"אהלן\", \"מה הולך\", etc.\n\
         - Sound like a young professional reaching out to a recruiter\n\n",
    );

    push_personal_info(&mut prompt, request, false);
    push_user_content(&mut prompt, request);

    prompt.push_str(
        "EXAMPLE STYLE (follow this tone and structure):\n\
         \"אהלן [שם המגייס] מה הולך? שמי [שם], הנני בוגר יחידת 8200 ובוגר תואר ראשון במדעי המחשב, \
         כעת עובד במשרה חלקית במשרד רה״מ. ראיתי את הפוסט בלינקדאין שפרסמת אתמול לגבי משרת ג׳וניור \
         שיש אצלכם, הייתי שמח לשלוח לך את הקו״ח שלי עבור הגשת מועמדות/סיוע שלך, אם אפשר כמובן המון תודה!\"\n\n\
         REQUIREMENTS:\n\
         1. Write in casual Hebrew (80-120 words)\n\
         2. Start with casual greeting using recruiter name if available\n\
         3. Include the person's name and brief background\n\
         4. Reference the specific job posting\n\
         5. Mention key qualifications naturally\n\
         6. Include polite request to send CV\n\
         7. End with casual thank you\n\
         8. Use modern Israeli Hebrew expressions\n\
         9. Sound natural and conversational\n\n\
         Generate only the Hebrew message content, no explanations or metadata.\n",
    );
    prompt
}
