//! Extra context attached to well-known role families.

use serde::Serialize;

/// Role families that come with a canned explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleGroup {
    DesignEngineering,
    StrategicProductDesign,
    BehaviouralDesign,
    UiDesign,
    FrontEnd,
    SoftwareDevelopment,
}

impl RoleGroup {
    /// The family a rule keyword belongs to.
    #[must_use]
    pub fn for_keyword(keyword: &str) -> Option<Self> {
        let group = match keyword {
            "design engineer" | "ux engineer" | "creative developer" | "frontend designer" => {
                Self::DesignEngineering
            }
            "strategic product design" => Self::StrategicProductDesign,
            "behavioural design" | "psychology design" => Self::BehaviouralDesign,
            "ui design" | "ui" | "user interface" | "interaction design" | "visual design"
            | "experience designer" | "interface designer" => Self::UiDesign,
            "front end developer" | "front end" => Self::FrontEnd,
            "software engineer" | "web developer" | "application developer" | "devops engineer"
            | "cloud engineer" | "api developer" | "database developer" | "platform engineer" => {
                Self::SoftwareDevelopment
            }
            _ => return None,
        };
        Some(group)
    }

    /// Skills to show for this family.
    #[must_use]
    pub fn highlights(self) -> &'static [&'static str] {
        match self {
            Self::DesignEngineering => &[
                "Design systems",
                "UX Design",
                "Product Design",
                "Frontend Development",
            ],
            Self::StrategicProductDesign => &[
                "Strategic Thinking",
                "Product Strategy",
                "UX Design",
                "Product Design",
            ],
            Self::BehaviouralDesign => &[
                "Behavioral Design",
                "Psychology",
                "UX Strategy",
                "Choice Architecture",
            ],
            Self::UiDesign => &[
                "UI Design",
                "Visual Design",
                "Interaction Design",
                "Design Systems",
            ],
            Self::FrontEnd | Self::SoftwareDevelopment => &[
                "Frontend Development",
                "Computer Science",
                "Digital Design",
            ],
        }
    }

    /// Explanation shown under the score.
    #[must_use]
    pub fn note(self, name: &str) -> String {
        match self {
            Self::DesignEngineering | Self::FrontEnd | Self::SoftwareDevelopment => format!(
                "{name} holds a degree in Computer Science and has always thrived in digital \
                 design environments. {name} contributed to the front-end development of the \
                 Bizkaia Provincial Council's public portal and built this very bot. The \
                 intersection of design and code, where creativity meets functionality, is \
                 where {name} feels at home."
            ),
            Self::StrategicProductDesign => format!(
                "{name} has extensive experience in strategic product design, having worked on \
                 complex design systems and product strategies at companies like ZARA. A \
                 background in both design and computer science lets {name} think strategically \
                 about product architecture and user experience."
            ),
            Self::BehaviouralDesign => format!(
                "{name} applies behavioral design principles to product work, combining \
                 psychology with UX strategy. Trained at Behavioral School, {name} uses nudges \
                 and choice architecture to reduce friction and guide decisions, blending \
                 research and data with human motivation."
            ),
            Self::UiDesign => format!(
                "{name}'s UI skills are grounded in both design and strategy: intuitive \
                 interfaces built on visual hierarchy, accessibility principles and design \
                 systems, with wireframes, prototypes and interactive flows that keep visuals \
                 attractive and usable."
            ),
        }
    }
}

/// Skills shown for a rule outside every family.
pub const DEFAULT_HIGHLIGHTS: &[&str] = &["Design systems", "UX Design", "Product Design"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_keyword() {
        assert_eq!(
            RoleGroup::for_keyword("ux engineer"),
            Some(RoleGroup::DesignEngineering)
        );
        assert_eq!(RoleGroup::for_keyword("ui"), Some(RoleGroup::UiDesign));
        assert_eq!(
            RoleGroup::for_keyword("cloud engineer"),
            Some(RoleGroup::SoftwareDevelopment)
        );
        assert_eq!(RoleGroup::for_keyword("senior ux designer"), None);
    }

    #[test]
    fn test_note_uses_name() {
        let note = RoleGroup::BehaviouralDesign.note("Ada");
        assert!(note.starts_with("Ada applies behavioral design"));
        assert!(!note.contains("Jon"));
    }
}
