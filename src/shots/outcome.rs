//! Shot outcome classification.
//!
//! Maps free-text outcome labels onto a closed category set used both for
//! counting (on target / goals) and for point colors.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCategory {
    Goal,
    OnTarget,
    Saved,
    OffTarget,
    Blocked,
    Missed,
    Unknown,
}

/// Display color used by plotting collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointColor {
    Green,
    Yellow,
    Red,
    Orange,
    Grey,
}

/// Label lookup, matched case-insensitively after trimming. The second block
/// holds the labels the open-data feed actually emits.
const OUTCOME_LABELS: &[(&str, OutcomeCategory)] = &[
    ("goal", OutcomeCategory::Goal),
    ("on target", OutcomeCategory::OnTarget),
    ("saved", OutcomeCategory::Saved),
    ("off target", OutcomeCategory::OffTarget),
    ("blocked", OutcomeCategory::Blocked),
    ("missed", OutcomeCategory::Missed),
    ("off t", OutcomeCategory::OffTarget),
    ("wayward", OutcomeCategory::Missed),
    ("post", OutcomeCategory::Missed),
    ("saved to post", OutcomeCategory::Saved),
    ("saved off target", OutcomeCategory::OffTarget),
];

impl OutcomeCategory {
    /// Classify a raw outcome label. Unlisted or absent labels are `Unknown`.
    pub fn classify(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::Unknown;
        };
        let label = label.trim();
        OUTCOME_LABELS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(label))
            .map(|(_, category)| *category)
            .unwrap_or(Self::Unknown)
    }

    pub fn color(self) -> PointColor {
        match self {
            Self::Goal => PointColor::Green,
            Self::OnTarget | Self::Saved => PointColor::Yellow,
            Self::OffTarget | Self::Missed => PointColor::Red,
            Self::Blocked => PointColor::Orange,
            Self::Unknown => PointColor::Grey,
        }
    }

    /// Goals and shots the keeper had to deal with count as on target.
    pub fn is_on_target(self) -> bool {
        matches!(self, Self::Goal | Self::OnTarget | Self::Saved)
    }

    pub fn is_goal(self) -> bool {
        self == Self::Goal
    }
}

impl std::fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Goal => write!(f, "Goal"),
            Self::OnTarget => write!(f, "On Target"),
            Self::Saved => write!(f, "Saved"),
            Self::OffTarget => write!(f, "Off Target"),
            Self::Blocked => write!(f, "Blocked"),
            Self::Missed => write!(f, "Missed"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl std::fmt::Display for PointColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
            Self::Red => write!(f, "red"),
            Self::Orange => write!(f, "orange"),
            Self::Grey => write!(f, "grey"),
        }
    }
}
