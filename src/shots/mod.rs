pub mod coords;
pub mod filter;
pub mod metrics;
pub mod outcome;
pub mod points;

use serde::Serialize;
use tracing::debug;

use crate::data::models::{Event, Point};
use crate::shots::outcome::OutcomeCategory;

/// One validated shot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotRecord {
    pub field: Point,
    /// Absent when the event had no usable end location (e.g. blocked shots).
    pub goal: Option<Point>,
    pub outcome: OutcomeCategory,
    pub xg: f64,
    /// Shooter, carried through to plot labels.
    pub player: Option<String>,
}

impl ShotRecord {
    /// Build a record from a shot event.
    ///
    /// Returns `None` for non-shot events and for shots whose pitch location
    /// does not decode; such events are dropped, never placed at a default.
    pub fn from_event(event: &Event) -> Option<Self> {
        if !event.is_shot() {
            return None;
        }
        let field = coords::normalize_field(event.location.as_ref())?;
        let goal = coords::normalize_field(event.shot_end_location.as_ref());

        Some(Self {
            field,
            goal,
            outcome: OutcomeCategory::classify(event.shot_outcome.as_deref()),
            xg: sanitize_xg(event.shot_statsbomb_xg),
            player: event.player.clone(),
        })
    }
}

/// Negative or non-finite xG values are treated as absent.
fn sanitize_xg(xg: Option<f64>) -> f64 {
    xg.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0)
}

/// Convert events into shot records, dropping everything that isn't a valid shot.
pub fn build_shot_records<'e, I>(events: I) -> Vec<ShotRecord>
where
    I: IntoIterator<Item = &'e Event>,
{
    let mut records = Vec::new();
    for event in events {
        match ShotRecord::from_event(event) {
            Some(record) => records.push(record),
            None if event.is_shot() => {
                debug!(
                    event_id = event.id.as_deref().unwrap_or("-"),
                    location = ?event.location,
                    "Dropping shot with invalid location"
                );
            }
            None => {}
        }
    }
    records
}
