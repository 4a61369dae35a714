//! Canned texts and the keyword checks that pick them.

/// Requests the bot never handles.
pub const OUT_OF_SCOPE_KEYWORDS: &[&str] = &[
    "salary",
    "salaries",
    "pay",
    "compensation",
    "wage",
    "money",
    "earnings",
    "cover letter",
    "coverletter",
    "motivation letter",
    "motivational letter",
    "cv",
    "resume",
    "application letter",
    "application form",
    "interview",
    "meeting",
    "call",
    "phone call",
    "video call",
    "availability",
    "schedule",
    "calendar",
    "appointment",
    "contact",
    "email",
    "phone",
    "number",
    "address",
    "social media",
    "linkedin",
    "twitter",
    "instagram",
    "references",
    "referees",
    "recommendations",
];

/// Words that suggest a job title or description.
pub const JOB_KEYWORDS: &[&str] = &[
    "designer",
    "ux",
    "product",
    "developer",
    "engineer",
    "manager",
    "lead",
    "senior",
    "researcher",
    "architect",
    "specialist",
    "consultant",
    "analyst",
    "coordinator",
    "director",
    "head",
    "principal",
];

/// Shorter input is never taken as a job description.
const MIN_JOB_DESCRIPTION_CHARS: usize = 30;

const QUESTION_WORDS: &[&str] = &[
    "what", "how", "which", "who", "why", "where", "when", "does", "did", "has", "he", "his", "she",
    "her", "they", "their",
];
const QUESTION_PHRASES: &[&str] = &["can you", "worked on", "experience"];
const PERSON_WORDS: &[&str] = &["he", "his", "she", "her", "they", "their"];
const PERSON_PHRASES: &[&str] = &["experience", "worked", "project"];
const GENERAL_PHRASES: &[&str] = &["what is", "how to", "explain", "define", "difference between"];
const CAREER_WORDS: &[&str] = &["job", "role", "position", "career", "salary", "interview"];

/// Lowercased alphanumeric words of `text`, padded with spaces so phrases
/// can be found with `contains(" phrase ")`.
fn padded_words(text: &str) -> String {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    format!(" {} ", words.join(" "))
}

fn has_term(padded: &str, term: &str) -> bool {
    padded.contains(&format!(" {term} "))
}

fn has_any(padded: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| has_term(padded, t))
}

/// True when `input` asks for something the bot never handles.
#[must_use]
pub fn is_out_of_scope(input: &str) -> bool {
    let padded = padded_words(input);
    OUT_OF_SCOPE_KEYWORDS.iter().any(|k| has_term(&padded, k))
}

/// True when `input` reads as a question about `name` rather than a role.
#[must_use]
pub fn is_question_about(input: &str, name: &str) -> bool {
    let padded = padded_words(input);
    input.trim_end().ends_with('?')
        || has_any(&padded, QUESTION_WORDS)
        || has_any(&padded, QUESTION_PHRASES)
        || (!name.is_empty() && has_term(&padded, &name.to_lowercase()))
}

/// True when `input` looks like a pasted job title or description.
#[must_use]
pub fn is_job_like(input: &str, name: &str) -> bool {
    let lower = input.to_lowercase();
    input.chars().count() > MIN_JOB_DESCRIPTION_CHARS
        && JOB_KEYWORDS.iter().any(|k| lower.contains(k))
        && !is_question_about(input, name)
}

#[must_use]
pub fn welcome(name: &str) -> String {
    format!(
        "Hi! I'm {name}'s AI assistant. Ask me about {name}'s experience, projects, or fit for \
         your company."
    )
}

#[must_use]
pub fn fit_prompt(name: &str) -> String {
    format!("Enter the role or job description and instantly see how {name} fits that position.")
}

#[must_use]
pub fn out_of_scope(name: &str) -> String {
    format!("That's outside my scope, but I can help you see how {name} matches a specific role.")
}

/// Hint shown when a role is described outside the company-fit flow.
#[must_use]
pub fn fit_hint(name: &str) -> String {
    format!(
        "I can help you understand how {name} fits for specific roles! To get a detailed \
         analysis with a fit score, start a company fit check, then describe the role you're \
         interested in."
    )
}

#[must_use]
pub fn project_query(name: &str) -> String {
    format!(
        "I can tell you about {name}'s projects. Are you interested in a specific sector like \
         SaaS, Fintech or E-commerce, or a particular project?"
    )
}

/// Reply when a sector is asked about but no project is listed for it.
#[must_use]
pub fn sector_without_projects(name: &str, sector: &str) -> String {
    format!(
        "{name} has experience in the {sector} sector, particularly with mobile shopping \
         experiences and e-commerce platforms, improving mobile conversion rates and user \
         engagement. Detailed case studies for this sector aren't available here."
    )
}

#[must_use]
pub fn no_answer(name: &str) -> String {
    format!(
        "I don't have specific information about that, but I can help you with questions about \
         {name}'s experience, projects, or fit for specific roles. Try asking about the work at \
         ZARA, design systems experience, or projects in SaaS, fintech, or automotive industries."
    )
}

#[must_use]
pub fn general_help(name: &str) -> String {
    format!(
        "I'm here to help you learn about {name}'s experience and skills. You can ask me about \
         work history, specific projects, or how well {name} fits particular roles. What would \
         you like to know?"
    )
}

#[must_use]
pub fn local_mode(name: &str) -> String {
    format!(
        "I'm currently running in local mode. I can answer questions about {name}'s experience \
         from my knowledge base, but general questions need an AI provider API key to be \
         configured."
    )
}

/// Suggestions for the topic area `query` touches, if it touches one.
#[must_use]
pub fn topic_guidance(query: &str, name: &str) -> Option<String> {
    let lower = query.to_lowercase();
    let topic = |area: &str, items: &[&str]| {
        let bullets: Vec<String> = items.iter().map(|i| format!("• \"{i}\"")).collect();
        format!(
            "I can tell you about {name}'s {area}! Try asking about:\n{}",
            bullets.join("\n")
        )
    };

    if ["design", "ux", "ui"].iter().any(|k| lower.contains(k)) {
        return Some(topic(
            "design experience",
            &[
                "Design systems experience",
                "UX research methods",
                "Prototyping and wireframing",
                "Design tools like Figma",
                "Mobile app design experience",
            ],
        ));
    }
    if ["development", "code", "frontend"].iter().any(|k| lower.contains(k)) {
        return Some(topic(
            "development skills",
            &[
                "Frontend development experience",
                "HTML/CSS/JavaScript skills",
                "Accessibility implementation",
                "Government website development",
                "Technical design skills",
            ],
        ));
    }
    if ["research", "user", "testing"].iter().any(|k| lower.contains(k)) {
        return Some(topic(
            "research experience",
            &[
                "User research methods",
                "Usability testing",
                "Field research",
                "Competitive analysis",
                "Research tools and processes",
            ],
        ));
    }
    if ["management", "lead", "team"].iter().any(|k| lower.contains(k)) {
        return Some(topic(
            "leadership experience",
            &[
                "Team leadership",
                "Project management",
                "Stakeholder management",
                "Agile methodologies",
                "Cross-functional collaboration",
            ],
        ));
    }
    if ["industry", "sector", "domain"].iter().any(|k| lower.contains(k)) {
        return Some(topic(
            "industry experience",
            &[
                "Healthcare/health-tech projects",
                "Automotive and manufacturing",
                "Fashion retail experience",
                "Construction technology",
                "Public sector work",
                "Startup experience",
            ],
        ));
    }

    None
}

/// Topic suggestions, falling back to the full list of things to ask.
#[must_use]
pub fn search_guidance(query: &str, name: &str) -> String {
    if let Some(guidance) = topic_guidance(query, name) {
        return guidance;
    }

    format!(
        "I can help you learn about {name}'s experience! Try asking about:\n\n\
         Skills & Expertise:\n• \"UX design experience\"\n• \"Design systems\"\n\
         • \"User research methods\"\n• \"Frontend development\"\n• \"Behavioral design\"\n\n\
         Industries:\n• \"Healthcare projects\"\n• \"Automotive experience\"\n\
         • \"Fashion retail work\"\n• \"Fintech\"\n• \"Public sector work\"\n\n\
         Seniority & Leadership:\n• \"Senior product designer projects\"\n\
         • \"Team leadership experience\"\n\n\
         Or start a company fit check to see how {name} matches a specific role!"
    )
}

/// Last-resort reply, picked by what kind of question `input` is.
#[must_use]
pub fn intelligent_fallback(input: &str, name: &str) -> String {
    let padded = padded_words(input);
    let lower = input.to_lowercase();
    let about_person = has_any(&padded, PERSON_WORDS)
        || PERSON_PHRASES.iter().any(|p| lower.contains(p))
        || (!name.is_empty() && has_term(&padded, &name.to_lowercase()));

    if about_person {
        no_answer(name)
    } else if has_any(&padded, GENERAL_PHRASES) {
        local_mode(name)
    } else if has_any(&padded, CAREER_WORDS) {
        fit_hint(name)
    } else {
        topic_guidance(input, name).unwrap_or_else(|| general_help(name))
    }
}
