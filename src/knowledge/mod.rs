//! Static knowledge about the portfolio owner.
//!
//! Q&A entries, projects, prior roles and the "About" card, loaded once at
//! startup and shared read-only afterwards.

mod loader;
mod types;

pub use loader::*;
pub use types::*;

/// Everything the bot knows, held in memory.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    qa: Vec<QaEntry>,
    projects: Vec<ProjectEntry>,
    bio: Vec<BioEntry>,
    about: Option<AboutSection>,
}

impl KnowledgeBase {
    /// Build a knowledge base from already-loaded records.
    #[must_use]
    pub fn new(qa: Vec<QaEntry>, projects: Vec<ProjectEntry>, bio: Vec<BioEntry>) -> Self {
        Self {
            qa,
            projects,
            bio,
            about: None,
        }
    }

    /// Attach an "About" card.
    #[must_use]
    pub fn with_about(mut self, about: Option<AboutSection>) -> Self {
        self.about = about;
        self
    }

    #[must_use]
    pub fn qa(&self) -> &[QaEntry] {
        &self.qa
    }

    #[must_use]
    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    #[must_use]
    pub fn bio(&self) -> &[BioEntry] {
        &self.bio
    }

    #[must_use]
    pub fn about(&self) -> Option<&AboutSection> {
        self.about.as_ref()
    }

    /// Look up a Q&A entry by intent key.
    #[must_use]
    pub fn find_intent(&self, intent_key: &str) -> Option<&QaEntry> {
        self.qa.iter().find(|e| e.intent_key == intent_key)
    }

    /// Look up a project by id.
    #[must_use]
    pub fn find_project(&self, id: &str) -> Option<&ProjectEntry> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// True when no Q&A entries and no projects are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.qa.is_empty() && self.projects.is_empty()
    }
}
