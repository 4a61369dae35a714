//! Score bands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How well a role fits, by score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitTier {
    Low,
    Partial,
    Good,
    Excellent,
}

impl FitTier {
    /// Band for a score: 75+ excellent, 50+ good, 25+ partial.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            75.. => Self::Excellent,
            50..=74 => Self::Good,
            25..=49 => Self::Partial,
            _ => Self::Low,
        }
    }

    /// Card heading.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Fit!",
            Self::Good => "Good Fit!",
            Self::Partial => "Partial Fit!",
            Self::Low => "Low Fit!",
        }
    }

    /// Score range covered by the band.
    #[must_use]
    pub fn range(self) -> &'static str {
        match self {
            Self::Excellent => "75-100",
            Self::Good => "50-75",
            Self::Partial => "25-50",
            Self::Low => "0-25",
        }
    }

    #[must_use]
    pub fn subtitle(self, name: &str) -> String {
        match self {
            Self::Excellent => format!("{name}'s profile aligns almost perfectly"),
            Self::Good => format!("{name} covers many of the key needs."),
            Self::Partial => "A few overlaps, but not a strong fit.".to_string(),
            Self::Low => format!("{name}'s skills don't match this role."),
        }
    }

    /// One-paragraph verdict.
    #[must_use]
    pub fn summary(self, name: &str) -> String {
        let range = self.range();
        let label = self.to_string();
        match self {
            Self::Excellent => format!(
                "{range} ({label}): \"Great match!\" {name}'s skills and experience align closely \
                 with what this role requires, making {name} a strong candidate to consider \
                 right away."
            ),
            Self::Good => format!(
                "{range} ({label}): \"Strong potential\" {name}'s experience connects well with \
                 many aspects of the role. With the right environment and team, this match \
                 could be very effective."
            ),
            Self::Partial => format!(
                "{range} ({label}): \"Some overlap\" {name} shares a few skills relevant to this \
                 role, though other areas may not fully match. With growth or a different role \
                 focus, the fit could improve."
            ),
            Self::Low => format!(
                "{range} ({label}): \"Not the best fit\" {name}'s background doesn't strongly \
                 align with this role. Every company values different strengths, so there \
                 might be better matches elsewhere."
            ),
        }
    }
}

impl fmt::Display for FitTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent Fit",
            Self::Good => "Good Fit",
            Self::Partial => "Partial Fit",
            Self::Low => "Low Fit",
        };
        f.write_str(label)
    }
}
