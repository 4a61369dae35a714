//! Keyword rules mapping a query to a known intent key.
//!
//! Used only after the scored matcher has nothing. Rules are checked in
//! order and the first hit wins, so broad sector words shadow narrower
//! project names further down.

/// One keyword rule.
struct IntentRule {
    intent: &'static str,
    /// Any of these substrings triggers the rule.
    keywords: &'static [&'static str],
    /// Any of these also triggers it, but only when the query mentions "scale".
    with_scale: &'static [&'static str],
}

const fn rule(intent: &'static str, keywords: &'static [&'static str]) -> IntentRule {
    IntentRule {
        intent,
        keywords,
        with_scale: &[],
    }
}

/// Prefix of intents that name a project rather than a Q&A entry.
pub const PROJECT_INTENT_PREFIX: &str = "project_";

/// Intent asking for projects in general.
pub const PROJECT_QUERY_INTENT: &str = "project_query";

const RULES: &[IntentRule] = &[
    rule("sector_saas", &["saas", "software as a service", "platform"]),
    rule(
        "sector_healthtech",
        &[
            "health-tech", "healthtech", "e-health", "healthcare", "orthodontist", "medical",
            "health", "clinic",
        ],
    ),
    rule(
        "sector_cybersecurity",
        &["cybersecurity", "cyber-security", "security", "wefender", "cyber", "protection"],
    ),
    rule(
        "sector_marketing_adtech",
        &["marketing", "ad-tech", "adtech", "advertising", "campaign", "promotion"],
    ),
    rule(
        "sector_construction",
        &[
            "construction", "tacktics", "building", "work-reports", "project-management",
            "construction area", "field-work", "site-management",
        ],
    ),
    rule(
        "sector_fintech",
        &["fintech", "bank", "la caixa", "banking", "financial", "finances"],
    ),
    rule(
        "sector_fashion_retail",
        &[
            "fashion", "retail", "clothing", "apparel", "style", "inditex", "zara", "pull&bear",
            "oysho",
        ],
    ),
    rule(
        "sector_ecommerce",
        &["e-commerce", "ecommerce", "shopping", "online-store", "digital-commerce"],
    ),
    rule(
        "sector_education",
        &["education", "university", "san jorge", "educación", "academic", "learning"],
    ),
    rule(
        "sector_mobility_automotive",
        &[
            "mobility", "automotive", "evcharge", "gestamp", "automóvil", "electric", "vehicle",
            "car", "transport",
        ],
    ),
    rule(
        "seniority_team_leadership",
        &[
            "lead", "team", "manage", "squad", "leadership", "coordinate", "supervise", "guide",
        ],
    ),
    rule(
        "seniority_design_systems",
        &[
            "design system", "veridata", "component", "design-tokens", "component-library",
            "design-standards",
        ],
    ),
    rule(
        "seniority_international",
        &["international", "global", "zara", "multinational", "cross-cultural", "ibex35"],
    ),
    rule(
        "seniority_product_designer",
        &["senior", "product designer", "senior-level", "lead designer", "principal designer"],
    ),
    rule(
        "seniority_strategic_ux",
        &["strategic", "strategy", "business-impact", "product-strategy", "strategic-thinking"],
    ),
    rule(
        "clients_startups",
        &["startup", "start-up", "emerging", "innovative", "fast-paced", "agile"],
    ),
    rule(
        "clients_corporations",
        &[
            "corporation", "large company", "enterprise", "corporate", "big company",
            "multinational",
        ],
    ),
    IntentRule {
        intent: "seniority_enterprise_scale",
        keywords: &[
            "enterprise scale",
            "platforms used by many",
            "large audiences",
            "hundreds of thousands",
            "products at scale",
        ],
        with_scale: &["large companies", "public institutions", "many people"],
    },
    rule(
        "clients_public_sector",
        &["public sector", "administration", "government", "public", "citizen", "municipal"],
    ),
    rule(
        "clients_tech_companies",
        &["tech", "technology", "digital", "software", "it", "information technology"],
    ),
    rule(
        "skills_data_driven",
        &["data", "metrics", "measure", "analytics", "kpi", "performance"],
    ),
    rule(
        "skills_design_tools",
        &["figma", "tool", "software", "prototype", "wireframe", "design-tool"],
    ),
    rule(
        "skills_agile",
        &["agile", "scrum", "methodology", "sprint", "iterative", "bi-weekly"],
    ),
    rule(
        "skills_ux_research",
        &[
            "research", "user interview", "testing", "a/b", "usability", "user-research",
            "field-research", "competitive-analysis",
        ],
    ),
    rule(
        "skills_frontend",
        &[
            "frontend", "front-end", "wordpress", "development", "code", "html", "css",
            "javascript",
        ],
    ),
    rule(
        "company_fit_overview",
        &["company fit", "profile", "experience", "fit", "match", "alignment"],
    ),
    rule(
        PROJECT_QUERY_INTENT,
        &["project", "proyecto", "case study", "portfolio", "work", "deliverable"],
    ),
    rule("project_evcharge", &["evcharge", "electric", "charging"]),
    rule("project_o21", &["o21", "e-health", "orthodontist"]),
    rule(
        "project_ecommerce",
        &["oysho", "pull", "inditex", "fashion", "retail"],
    ),
    rule("project_la_caixa", &["la caixa", "banking", "fintech"]),
    rule(
        "project_veridata",
        &["veridata", "design system", "government"],
    ),
    rule("project_zara", &["zara", "internal tools", "engineering"]),
    rule(
        "project_gestamp",
        &["gestamp", "automotive", "manufacturing"],
    ),
    rule(
        "project_wefender",
        &["wefender", "cybersecurity", "security"],
    ),
    rule(
        "project_tacktics",
        &["tacktics", "construction", "project management"],
    ),
    rule(
        "project_appsamblea",
        &["appsamblea", "startup", "collaboration"],
    ),
    rule(
        "project_biscay",
        &["biscay", "administration", "public sector"],
    ),
    rule(
        "project_pharmacists",
        &["pharmacists", "madrid", "association"],
    ),
];

impl IntentRule {
    fn matches(&self, query: &str) -> bool {
        self.keywords.iter().any(|k| query.contains(k))
            || (query.contains("scale") && self.with_scale.iter().any(|k| query.contains(k)))
    }
}

/// First intent whose keywords appear in `query`.
#[must_use]
pub fn detect_intent(query: &str) -> Option<&'static str> {
    let query = query.to_lowercase();
    let hit = RULES.iter().find(|r| r.matches(&query)).map(|r| r.intent);
    if let Some(intent) = hit {
        tracing::debug!(intent, "Keyword intent detected");
    }
    hit
}

/// The project slug named by a `project_*` intent, if it names one.
#[must_use]
pub fn project_slug(intent: &str) -> Option<&str> {
    intent
        .strip_prefix(PROJECT_INTENT_PREFIX)
        .filter(|_| intent != PROJECT_QUERY_INTENT)
}
