//! Integration tests for role-fit scoring.

use std::path::PathBuf;

use portfolio_bot::config::{BotConfig, KnowledgeConfig, ProfileConfig};
use portfolio_bot::fit::{
    score_fit, CandidateProfile, FitSource, FitTier, RoleFitTable, MAX_FIT_SCORE,
};
use portfolio_bot::knowledge::KnowledgeBase;

async fn shipped_profile() -> CandidateProfile {
    let kb = KnowledgeBase::load(&KnowledgeConfig {
        data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"),
        ..KnowledgeConfig::default()
    })
    .await;
    CandidateProfile::from_knowledge(&kb, &ProfileConfig::default())
}

#[tokio::test]
async fn test_rule_scores() {
    let profile = shipped_profile().await;
    let rules = RoleFitTable::with_default_rules();

    let report = score_fit("Senior UX Designer", &rules, &profile);
    assert_eq!(report.score, 94);
    assert_eq!(report.tier, FitTier::Excellent);
    assert_eq!(report.title, "Excellent Fit!");
    assert_eq!(report.source, FitSource::Rule);
    assert_eq!(report.matched_rule.as_deref(), Some("senior ux designer"));

    let report = score_fit("Creative Developer", &rules, &profile);
    assert_eq!(report.score, 88);
}

#[tokio::test]
async fn test_unrelated_role_scores_zero() {
    let profile = shipped_profile().await;
    let report = score_fit(
        "Marketing Manager at a beverage brand",
        &RoleFitTable::with_default_rules(),
        &profile,
    );
    assert_eq!(report.score, 0);
    assert_eq!(report.tier, FitTier::Low);
    assert_eq!(report.source, FitSource::Heuristic);
}

#[tokio::test]
async fn test_heuristic_clamps_to_max() {
    let profile = shipped_profile().await;
    let report = score_fit(
        "Senior healthcare role in SaaS owning design systems and prototyping",
        &RoleFitTable::new(),
        &profile,
    );
    assert_eq!(report.score, MAX_FIT_SCORE);
    assert!(report.matched_skills.contains(&"design systems".to_string()));
    assert!(report.matched_domains.contains(&"healthcare".to_string()));
}

#[tokio::test]
async fn test_profile_from_shipped_data() {
    let profile = shipped_profile().await;
    assert_eq!(profile.name, "Jon");
    assert_eq!(profile.prior_roles.len(), 2);
    assert!(profile.skills.contains(&"ux lead".to_string()));
    assert!(profile.describe().starts_with("Name: Jon\n"));
}

#[test]
fn test_rules_from_toml() {
    let config: BotConfig = toml::from_str(
        r#"
        [[fit.rules]]
        keyword = "staff designer"
        score = 90

        [[fit.rules]]
        keyword = "dream job"
        score = 120
        "#,
    )
    .unwrap();

    let table = RoleFitTable::from_config(&config.fit).unwrap();
    assert_eq!(table.len(), 2);

    let profile = CandidateProfile::default();
    assert_eq!(score_fit("Staff Designer", &table, &profile).score, 90);
    assert_eq!(score_fit("My dream job", &table, &profile).score, MAX_FIT_SCORE);
}
