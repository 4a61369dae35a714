//! Prompts for the generative fallback.

/// System prompt for role-fit analysis.
pub const ROLE_ANALYST_SYSTEM_PROMPT: &str = "You are a professional HR analyst specializing in \
UX/Product Design roles. Provide accurate, helpful assessments.";

/// System prompt for free-form questions about the portfolio owner.
#[must_use]
pub fn assistant_system_prompt(name: &str) -> String {
    format!(
        "You are {name}Bot, {name}'s AI assistant. Provide helpful, accurate responses about \
         {name}'s experience or general questions."
    )
}

/// User message for a free-form question.
#[must_use]
pub fn format_question(name: &str, question: &str, background: &str) -> String {
    format!(
        r#"You are {name}Bot, an AI assistant for {name}, a Senior Product Designer with expertise in UX/UI design, design systems and digital product development.

{name}'s background:
{background}

User question: "{question}"

Please provide a helpful, accurate response. If the question is about {name}'s experience and you don't have specific information, say so. If it's a general question, provide a helpful answer while mentioning you're {name}'s AI assistant.

Keep responses concise (2-3 sentences max) and professional."#
    )
}

/// User message asking for a JSON fit analysis.
#[must_use]
pub fn format_role_analysis(name: &str, job_description: &str, profile: &str) -> String {
    format!(
        r#"You are an AI assistant helping to analyze job fit.

JOB DESCRIPTION:
{job_description}

CANDIDATE PROFILE:
{profile}

Please analyze how well this candidate fits the role and provide:
1. A fit score (0-97, never 100 as it's unrealistic)
2. Key strengths that align with the role
3. A 2-3 sentence explanation of "Why It's a Match" that references specific elements of the job posting and connects them to {name}'s relevant experience, projects or working style.

Format your response as JSON:
{{
    "fitScore": 85,
    "strengths": ["strength1", "strength2"],
    "whyItsAMatch": "Personalized explanation connecting their requirements to {name}'s background."
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_use_name() {
        assert!(assistant_system_prompt("Ada").starts_with("You are AdaBot, Ada's AI assistant."));
        let question = format_question("Ada", "What tools?", "- Figma");
        assert!(question.contains("User question: \"What tools?\""));
        assert!(question.contains("Ada's background:\n- Figma"));
    }

    #[test]
    fn test_role_analysis_prompt_has_json_shape() {
        let prompt = format_role_analysis("Ada", "Senior designer", "Name: Ada");
        assert!(prompt.contains("\"fitScore\": 85"));
        assert!(prompt.contains("JOB DESCRIPTION:\nSenior designer"));
    }
}
