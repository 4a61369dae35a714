//! Reading knowledge files from disk.
//!
//! The `read_*` functions are strict and report every failure.
//! [`KnowledgeBase::load`] is lenient: a missing or malformed file is logged
//! and treated as empty so the bot can still run on whatever loaded.

use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{AboutSection, BioEntry, KnowledgeBase, ProjectEntry, QaEntry};
use crate::config::KnowledgeConfig;

/// Errors from reading a knowledge file.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge file unavailable {path}: {source}")]
    Unavailable { path: PathBuf, source: io::Error },
    #[error("Malformed knowledge file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl KnowledgeError {
    /// True when the file simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Unavailable { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, KnowledgeError> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| KnowledgeError::Unavailable {
                path: path.to_path_buf(),
                source,
            })?;

    serde_json::from_str(&content).map_err(|source| KnowledgeError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a Q&A file (a JSON array of entries).
///
/// # Errors
///
/// Returns `KnowledgeError` if the file cannot be read or parsed.
pub async fn read_qa(path: &Path) -> Result<Vec<QaEntry>, KnowledgeError> {
    read_json(path).await
}

/// Read a projects file (a JSON array of projects).
///
/// # Errors
///
/// Returns `KnowledgeError` if the file cannot be read or parsed.
pub async fn read_projects(path: &Path) -> Result<Vec<ProjectEntry>, KnowledgeError> {
    read_json(path).await
}

/// Read a bio file (a JSON array of prior roles).
///
/// # Errors
///
/// Returns `KnowledgeError` if the file cannot be read or parsed.
pub async fn read_bio(path: &Path) -> Result<Vec<BioEntry>, KnowledgeError> {
    read_json(path).await
}

/// Read the "About" file.
///
/// # Errors
///
/// Returns `KnowledgeError` if the file cannot be read or parsed.
pub async fn read_about(path: &Path) -> Result<AboutSection, KnowledgeError> {
    read_json(path).await
}

/// Drop projects whose id is in `hidden`.
#[must_use]
pub fn filter_hidden(projects: Vec<ProjectEntry>, hidden: &[String]) -> Vec<ProjectEntry> {
    let before = projects.len();
    let visible: Vec<_> = projects
        .into_iter()
        .filter(|p| !hidden.iter().any(|h| h == &p.id))
        .collect();
    if visible.len() < before {
        tracing::debug!(hidden = before - visible.len(), "Filtered hidden projects");
    }
    visible
}

fn or_empty<T: Default>(result: Result<T, KnowledgeError>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) if e.is_not_found() => {
            tracing::debug!(what, error = %e, "Knowledge file not found");
            T::default()
        }
        Err(e) => {
            tracing::warn!(what, error = %e, "Failed to load knowledge file, continuing without it");
            T::default()
        }
    }
}

impl KnowledgeBase {
    /// Load every knowledge file named by `config`.
    ///
    /// Never fails. The primary Q&A file falls back to the legacy one, and any
    /// file that still cannot be loaded counts as empty.
    pub async fn load(config: &KnowledgeConfig) -> Self {
        let dir = &config.data_dir;

        let qa = match read_qa(&dir.join(&config.qa_file)).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Primary Q&A file unavailable, trying legacy file");
                or_empty(read_qa(&dir.join(&config.legacy_qa_file)).await, "qa")
            }
        };

        let projects = or_empty(
            read_projects(&dir.join(&config.projects_file)).await,
            "projects",
        );
        let projects = filter_hidden(projects, &config.hidden_projects);
        let bio = or_empty(read_bio(&dir.join(&config.bio_file)).await, "bio");
        let about = match read_about(&dir.join(&config.about_file)).await {
            Ok(about) => Some(about),
            Err(e) => {
                tracing::debug!(error = %e, "No about section loaded");
                None
            }
        };

        tracing::info!(
            qa = qa.len(),
            projects = projects.len(),
            bio = bio.len(),
            about = about.is_some(),
            "Knowledge base loaded"
        );

        Self::new(qa, projects, bio).with_about(about)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str) -> ProjectEntry {
        serde_json::from_value(serde_json::json!({ "id": id, "project_name": id })).unwrap()
    }

    #[test]
    fn test_filter_hidden() {
        let projects = vec![project("a"), project("oysho-inditex"), project("b")];
        let visible = filter_hidden(projects, &["oysho-inditex".to_string()]);
        let ids: Vec<_> = visible.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_read_qa_missing_file() {
        let err = read_qa(Path::new("/nonexistent/qa.json")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_read_qa_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = read_qa(&path).await.unwrap_err();
        assert!(matches!(err, KnowledgeError::Malformed { .. }));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_load_missing_dir_is_empty() {
        let config = KnowledgeConfig {
            data_dir: PathBuf::from("/nonexistent/kb"),
            ..KnowledgeConfig::default()
        };
        let kb = KnowledgeBase::load(&config).await;
        assert!(kb.qa().is_empty());
        assert!(kb.projects().is_empty());
        assert!(kb.about().is_none());
    }

    #[tokio::test]
    async fn test_load_falls_back_to_legacy_qa() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("qa_kb.json"),
            r#"[{"intent_key": "legacy", "canonical_question": "Old?", "answer": "Yes."}]"#,
        )
        .unwrap();

        let config = KnowledgeConfig {
            data_dir: dir.path().to_path_buf(),
            ..KnowledgeConfig::default()
        };
        let kb = KnowledgeBase::load(&config).await;
        assert_eq!(kb.qa().len(), 1);
        assert_eq!(kb.qa()[0].intent_key, "legacy");
    }
}
