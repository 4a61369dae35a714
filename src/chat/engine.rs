//! The chat pipeline.
//!
//! Each message runs through a fixed sequence of stages; the first stage
//! that produces a reply wins:
//!
//! 1. out-of-scope requests
//! 2. role-fit analysis, only while a role description is awaited
//! 3. Q&A matcher, then legacy intent keywords
//! 4. sector listing, then project search
//! 5. a hint for role titles and job descriptions outside the fit flow
//! 6. the generative fallback, when configured
//! 7. canned guidance keyed on the kind of question

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::context::{ConversationContext, Speaker};
use super::fallback;
use super::reply::Reply;
use crate::ai::{AiClient, AiError};
use crate::config::{BotConfig, MatcherConfig};
use crate::fit::{score_fit, CandidateProfile, FitReport, RoleFitTable, RuleError};
use crate::knowledge::{KnowledgeBase, ProjectEntry};
use crate::matcher::{
    detect_intent, match_query, project_slug, projects_in_sector, search_projects, sector_of,
    PROJECT_QUERY_INTENT,
};

/// Label for the sector listing shortcut.
const SECTOR_LABEL: &str = "fashion retail";
const SECTOR_TERMS: &[&str] = &["fashion", "retail"];
const ECOMMERCE_SLUG: &str = "ecommerce";
const ECOMMERCE_TERMS: &[&str] = &["e-commerce", "retail", "fashion"];

/// Card actions that bypass free-text handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Start the company-fit flow.
    BeginFit,
    ShowProjects,
    About,
    Welcome,
}

/// Answers messages for one portfolio owner.
#[derive(Debug, Clone)]
pub struct ChatEngine {
    knowledge: Arc<KnowledgeBase>,
    matcher: MatcherConfig,
    rules: RoleFitTable,
    profile: CandidateProfile,
    ai: Option<AiClient>,
}

impl ChatEngine {
    /// Create an engine without a generative fallback.
    #[must_use]
    pub fn new(knowledge: Arc<KnowledgeBase>, config: &BotConfig, rules: RoleFitTable) -> Self {
        let profile = CandidateProfile::from_knowledge(&knowledge, &config.profile);
        Self {
            knowledge,
            matcher: config.matcher.clone(),
            rules,
            profile,
            ai: None,
        }
    }

    /// Attach (or remove) the generative fallback.
    #[must_use]
    pub fn with_ai(mut self, ai: Option<AiClient>) -> Self {
        self.ai = ai;
        self
    }

    /// Build an engine from configuration.
    ///
    /// The AI client is attached only when enabled and its API key is set;
    /// otherwise the engine runs in local mode.
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if a configured role rule fails to compile.
    pub fn from_config(knowledge: Arc<KnowledgeBase>, config: &BotConfig) -> Result<Self, RuleError> {
        let rules = RoleFitTable::from_config(&config.fit)?;
        let ai = if config.ai.enabled {
            match AiClient::from_config(config.ai.clone()) {
                Ok(client) => Some(client),
                Err(AiError::MissingApiKey(env)) => {
                    tracing::info!(env = %env, "No AI API key set, running in local mode");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "AI client unavailable, running in local mode");
                    None
                }
            }
        } else {
            tracing::debug!("AI disabled in config");
            None
        };
        Ok(Self::new(knowledge, config, rules).with_ai(ai))
    }

    /// Name of the portfolio owner.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    #[must_use]
    pub fn profile(&self) -> &CandidateProfile {
        &self.profile
    }

    #[must_use]
    pub fn rules(&self) -> &RoleFitTable {
        &self.rules
    }

    /// True when the generative fallback is attached.
    #[must_use]
    pub fn has_ai(&self) -> bool {
        self.ai.is_some()
    }

    /// Answer one message.
    ///
    /// Blank input is ignored and returns `None`; anything else gets a reply,
    /// and both sides are recorded in `ctx`.
    pub async fn respond(&self, ctx: &mut ConversationContext, input: &str) -> Option<Reply> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        ctx.record(Speaker::User, input);
        let reply = self.reply_to(ctx, input).await;
        tracing::debug!(conversation = %ctx.id(), kind = reply.kind(), "Replying");
        ctx.record(Speaker::Bot, reply.to_text());
        Some(reply)
    }

    /// Run a card action.
    pub fn act(&self, ctx: &mut ConversationContext, action: Action) -> Reply {
        let name = self.name();
        let reply = match action {
            Action::BeginFit => {
                ctx.await_role_description();
                Reply::FitPrompt {
                    text: fallback::fit_prompt(name),
                }
            }
            Action::ShowProjects => self.all_projects(),
            Action::About => match self.knowledge.about() {
                Some(section) => Reply::About {
                    section: section.clone(),
                },
                None => Reply::Guidance {
                    text: fallback::general_help(name),
                },
            },
            Action::Welcome => Reply::Welcome {
                text: fallback::welcome(name),
            },
        };
        tracing::debug!(conversation = %ctx.id(), ?action, "Card action");
        ctx.record(Speaker::Bot, reply.to_text());
        reply
    }

    /// Score a job description, asking the model first when configured.
    pub async fn fit(&self, job_description: &str) -> FitReport {
        if let Some(ai) = self.ai.as_ref().filter(|ai| ai.use_for_fit()) {
            match ai.analyze_role(job_description, &self.profile).await {
                Ok(report) => return report,
                Err(e) => {
                    tracing::warn!(error = %e, "AI role analysis failed, using local scorer");
                }
            }
        }
        score_fit(job_description, &self.rules, &self.profile)
    }

    async fn reply_to(&self, ctx: &mut ConversationContext, input: &str) -> Reply {
        let name = self.name();

        let awaiting = ctx.take_awaiting_role_description();
        if !awaiting && fallback::is_out_of_scope(input) {
            return Reply::OutOfScope {
                text: fallback::out_of_scope(name),
            };
        }

        if awaiting {
            tracing::debug!("Running fit analysis");
            return Reply::Fit {
                report: self.fit(input).await,
            };
        }

        if let Some(hit) = match_query(input, self.knowledge.qa(), &self.matcher)
            .filter(|hit| !hit.entry.answer.is_empty())
        {
            return Reply::Answer {
                text: hit.entry.answer.clone(),
                intent: Some(hit.entry.intent_key.clone()),
            };
        }

        if let Some(reply) = self.intent_reply(input) {
            return reply;
        }

        if sector_of(input).is_some() {
            return self.sector_reply();
        }

        let hits = search_projects(input, self.knowledge.projects());
        match hits.as_slice() {
            [] => {}
            [hit] => {
                return Reply::Project {
                    project: hit.project.clone(),
                }
            }
            many => {
                return Reply::Projects {
                    heading: format!("I found {} relevant projects:", many.len()),
                    projects: many.iter().map(|h| h.project.clone()).collect(),
                }
            }
        }

        // Role titles are only scored inside the fit flow.
        let names_role =
            self.rules.first_match(input).is_some() && !fallback::is_question_about(input, name);
        if names_role || fallback::is_job_like(input, name) {
            return Reply::Guidance {
                text: fallback::fit_hint(name),
            };
        }

        if let Some(ai) = &self.ai {
            return match ai
                .answer_question(name, input, &self.profile.describe())
                .await
            {
                Ok(text) => Reply::Generated { text },
                Err(e) => {
                    tracing::warn!(error = %e, "Generative answer failed");
                    Reply::Guidance {
                        text: e.guidance(name),
                    }
                }
            };
        }

        Reply::Guidance {
            text: fallback::intelligent_fallback(input, name),
        }
    }

    fn intent_reply(&self, input: &str) -> Option<Reply> {
        let intent = detect_intent(input)?;
        if intent == PROJECT_QUERY_INTENT {
            return Some(Reply::Guidance {
                text: fallback::project_query(self.name()),
            });
        }

        if let Some(entry) = self
            .knowledge
            .find_intent(intent)
            .filter(|e| !e.answer.is_empty())
        {
            return Some(Reply::Answer {
                text: entry.answer.clone(),
                intent: Some(entry.intent_key.clone()),
            });
        }

        self.project_by_slug(project_slug(intent)?)
    }

    fn project_by_slug(&self, slug: &str) -> Option<Reply> {
        let id = slug.replace('_', "-");
        let projects = self.knowledge.projects();
        if let Some(project) = projects
            .iter()
            .find(|p| p.id == id)
            .or_else(|| projects.iter().find(|p| p.id.contains(&id)))
        {
            return Some(Reply::Project {
                project: project.clone(),
            });
        }

        if slug == ECOMMERCE_SLUG {
            let matching = self.projects_matching(ECOMMERCE_TERMS);
            if !matching.is_empty() {
                return Some(Reply::Projects {
                    heading: format!(
                        "{} has worked on {} e-commerce projects:",
                        self.name(),
                        matching.len()
                    ),
                    projects: matching,
                });
            }
        }
        None
    }

    fn sector_reply(&self) -> Reply {
        let projects = self.projects_matching(SECTOR_TERMS);
        if projects.is_empty() {
            return Reply::Guidance {
                text: fallback::sector_without_projects(self.name(), SECTOR_LABEL),
            };
        }
        Reply::Projects {
            heading: format!(
                "I found {} relevant {SECTOR_LABEL} projects:",
                projects.len()
            ),
            projects,
        }
    }

    fn all_projects(&self) -> Reply {
        let projects = self.knowledge.projects();
        if projects.is_empty() {
            return Reply::Guidance {
                text: fallback::general_help(self.name()),
            };
        }
        Reply::Projects {
            heading: format!("Here are {} of {}'s projects:", projects.len(), self.name()),
            projects: projects.to_vec(),
        }
    }

    /// Projects in any of `sectors`, in corpus order, without duplicates.
    fn projects_matching(&self, sectors: &[&str]) -> Vec<ProjectEntry> {
        let mut found: Vec<ProjectEntry> = Vec::new();
        for sector in sectors {
            for project in projects_in_sector(sector, self.knowledge.projects()) {
                if !found.iter().any(|p| p.id == project.id) {
                    found.push(project.clone());
                }
            }
        }
        let projects = self.knowledge.projects();
        found.sort_by_key(|p| projects.iter().position(|q| q.id == p.id));
        found
    }
}
