use serde::Serialize;

use crate::shots::outcome::{OutcomeCategory, PointColor};
use crate::shots::ShotRecord;

/// A plottable point tagged with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub outcome: OutcomeCategory,
    pub color: PointColor,
    /// Hover label for team-wide plots.
    pub player: Option<String>,
}

impl PlotPoint {
    fn new(x: f64, y: f64, shot: &ShotRecord) -> Self {
        Self {
            x,
            y,
            outcome: shot.outcome,
            color: shot.outcome.color(),
            player: shot.player.clone(),
        }
    }
}

/// Field-space and goal-space point sets, kept separate.
///
/// Every shot has a pitch location; only shots with a recorded end location
/// appear in `goal`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PointSets {
    pub field: Vec<PlotPoint>,
    pub goal: Vec<PlotPoint>,
}

pub fn build_point_sets(shots: &[ShotRecord]) -> PointSets {
    let field = shots
        .iter()
        .map(|s| PlotPoint::new(s.field.x, s.field.y, s))
        .collect();
    let goal = shots
        .iter()
        .filter_map(|s| s.goal.map(|g| PlotPoint::new(g.x, g.y, s)))
        .collect();

    PointSets { field, goal }
}
