use serde::{Deserialize, Serialize};

/// Event type label for shots in the open-data event stream.
pub const SHOT_EVENT_TYPE: &str = "Shot";

/// One row of raw match-event data.
///
/// Every field is optional: the source tables drop columns depending on the
/// snapshot, so presence is recorded here once at ingestion and checked by the
/// pipeline stages that need it. Location fields are kept as supplied and only
/// interpreted by [`crate::shots::coords::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<String>,
    pub match_id: Option<u64>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub team: Option<String>,
    pub player: Option<String>,
    pub position: Option<String>,
    pub location: Option<serde_json::Value>,
    pub shot_end_location: Option<serde_json::Value>,
    pub shot_outcome: Option<String>,
    pub shot_statsbomb_xg: Option<f64>,
}

impl Event {
    pub fn is_type(&self, event_type: &str) -> bool {
        self.event_type.as_deref() == Some(event_type)
    }

    pub fn is_shot(&self) -> bool {
        self.is_type(SHOT_EVENT_TYPE)
    }
}

/// A validated, finite 2-D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for serde_json::Value {
    fn from(p: Point) -> Self {
        serde_json::json!([p.x, p.y])
    }
}

/// A competition/season pair from the open-data index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    pub competition_id: u64,
    pub season_id: u64,
    pub competition_name: String,
    pub season_name: String,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub competition_gender: Option<String>,
}

/// A single match in a competition season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInfo {
    pub match_id: u64,
    pub match_date: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl std::fmt::Display for MatchInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} vs {}", self.home_team, self.away_team)?;
        if let (Some(h), Some(a)) = (self.home_score, self.away_score) {
            write!(f, " ({h}-{a})")?;
        }
        Ok(())
    }
}
