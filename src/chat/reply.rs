//! What the bot says back.

use std::fmt::Write as _;

use serde::Serialize;

use crate::fit::FitReport;
use crate::knowledge::{AboutSection, ProjectEntry};

/// A bot reply. Presentation layers render each kind differently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// An answer from the knowledge base.
    Answer {
        text: String,
        intent: Option<String>,
    },
    /// A single project.
    Project { project: ProjectEntry },
    /// Several projects under a heading.
    Projects {
        heading: String,
        projects: Vec<ProjectEntry>,
    },
    /// A role-fit analysis.
    Fit { report: FitReport },
    /// The request is something the bot never handles.
    OutOfScope { text: String },
    /// Suggestions on what to ask instead.
    Guidance { text: String },
    /// Text from the generative fallback.
    Generated { text: String },
    About { section: AboutSection },
    Welcome { text: String },
    /// Invitation to describe a role.
    FitPrompt { text: String },
}

impl Reply {
    /// Stable name of the reply kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Answer { .. } => "answer",
            Self::Project { .. } => "project",
            Self::Projects { .. } => "projects",
            Self::Fit { .. } => "fit",
            Self::OutOfScope { .. } => "out_of_scope",
            Self::Guidance { .. } => "guidance",
            Self::Generated { .. } => "generated",
            Self::About { .. } => "about",
            Self::Welcome { .. } => "welcome",
            Self::FitPrompt { .. } => "fit_prompt",
        }
    }

    /// Plain-text rendering, used for transcripts.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Answer { text, .. }
            | Self::OutOfScope { text }
            | Self::Guidance { text }
            | Self::Generated { text }
            | Self::Welcome { text }
            | Self::FitPrompt { text } => text.clone(),
            Self::Project { project } => format!("I found a relevant project!\n{}", project_details(project)),
            Self::Projects { heading, projects } => {
                let mut out = heading.clone();
                for project in projects {
                    out.push_str("\n\n");
                    out.push_str(&project_summary(project));
                }
                out
            }
            Self::Fit { report } => fit_text(report),
            Self::About { section } => {
                let mut out = section.title.clone();
                for paragraph in &section.paragraphs {
                    if !out.is_empty() {
                        out.push_str("\n\n");
                    }
                    out.push_str(paragraph);
                }
                out
            }
        }
    }
}

/// Full project card: problem, work, results, client, role.
#[must_use]
pub fn project_details(project: &ProjectEntry) -> String {
    let mut out = project.name.clone();
    for (label, value) in [
        ("Problem", &project.problem_solved),
        ("What was done", &project.what_was_done),
        ("Results", &project.results_metrics),
        ("Client", &project.client),
        ("Role", &project.role),
    ] {
        if !value.is_empty() {
            let _ = write!(out, "\n\n{label}: {value}");
        }
    }
    if let Some(link) = &project.case_study_link {
        let _ = write!(out, "\n\nCase Study: {link}");
    }
    out
}

/// Short project summary for lists.
#[must_use]
pub fn project_summary(project: &ProjectEntry) -> String {
    let mut out = if project.client.is_empty() {
        project.name.clone()
    } else {
        format!("{} ({})", project.name, project.client)
    };
    if !project.problem_solved.is_empty() {
        let _ = write!(out, "\nProblem: {}", project.problem_solved);
    }
    if !project.results_metrics.is_empty() {
        let _ = write!(out, "\nResults: {}", project.results_metrics);
    }
    out
}

fn fit_text(report: &FitReport) -> String {
    let mut out = format!(
        "{} {}%\n{}\n\n{}",
        report.title, report.score, report.subtitle, report.summary
    );
    if !report.matched_skills.is_empty() {
        let _ = write!(out, "\n\nStrengths: {}", report.matched_skills.join(", "));
    }
    if let Some(note) = &report.note {
        let _ = write!(out, "\n\n{note}");
    }
    out
}
