//! Shooting report for one team, optionally narrowed to one player.
//!
//! Runs the full pipeline: scope filter, shot extraction (location decoding
//! and outcome classification), aggregation, and point-set building.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::data::models::{Event, SHOT_EVENT_TYPE};
use crate::shots::filter::{filter_events, EventFilter};
use crate::shots::metrics::{aggregate, games_played, goals_per_game, AggregateMetrics};
use crate::shots::points::{build_point_sets, PlotPoint, PointSets};
use crate::shots::build_shot_records;

/// Who a report is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportScope {
    pub team: String,
    pub player: Option<String>,
}

impl ReportScope {
    pub fn team(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            player: None,
        }
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    fn filter(&self) -> EventFilter<'_> {
        EventFilter::team(&self.team).player(self.player.as_deref())
    }
}

impl fmt::Display for ReportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.player {
            Some(player) => write!(f, "{player} ({})", self.team),
            None => write!(f, "{}", self.team),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotReport {
    pub scope: ReportScope,
    pub metrics: AggregateMetrics,
    pub games_played: u64,
    pub goals_per_game: f64,
    pub points: PointSets,
}

impl ShotReport {
    /// True when the scope had no usable shots.
    pub fn is_empty(&self) -> bool {
        self.metrics.shots_taken == 0
    }
}

/// Build the report for `scope`. Never fails; an empty selection produces an
/// all-zero report with empty point sets.
pub fn analyze(events: &[Event], scope: &ReportScope) -> ShotReport {
    let filter = scope.filter();
    let scoped = filter_events(events, &filter);
    let games = games_played(scoped.iter().copied());

    let shot_events = scoped.iter().copied().filter(|e| e.is_type(SHOT_EVENT_TYPE));
    let shots = build_shot_records(shot_events);

    let metrics = aggregate(&shots);
    let points = build_point_sets(&shots);

    info!(
        scope = %scope,
        events = scoped.len(),
        shots = metrics.shots_taken,
        goals = metrics.goals,
        xg = metrics.expected_goals,
        "Shot report built"
    );

    ShotReport {
        scope: scope.clone(),
        metrics,
        games_played: games,
        goals_per_game: goals_per_game(metrics.goals, games),
        points,
    }
}

impl fmt::Display for ShotReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        writeln!(f, "=== Shooting Report: {} ===", self.scope)?;
        writeln!(f, "Shots Taken: {}", m.shots_taken)?;
        writeln!(f, "Shots on Target: {}", m.shots_on_target)?;
        writeln!(f, "Goals: {}", m.goals)?;
        writeln!(f, "Shot Conversion Rate: {:.1}%", m.conversion_rate)?;
        writeln!(
            f,
            "Goals per Game: {:.2} ({} games)",
            self.goals_per_game, self.games_played
        )?;
        writeln!(f, "Expected Goals (xG): {:.2}", m.expected_goals)?;

        // Team-wide plots label each point with its shooter.
        let label = |p: &PlotPoint| match (&self.scope.player, &p.player) {
            (None, Some(player)) => format!("  {player}"),
            _ => String::new(),
        };

        writeln!(f, "\nShot Locations on the Field ({}):", self.points.field.len())?;
        for p in &self.points.field {
            writeln!(
                f,
                "  ({:>5.1}, {:>5.1})  {} ({}){}",
                p.x,
                p.y,
                p.outcome,
                p.color,
                label(p)
            )?;
        }
        write!(f, "\nShot Outcomes in Goal ({}):", self.points.goal.len())?;
        for p in &self.points.goal {
            write!(
                f,
                "\n  ({:>5.1}, {:>5.1})  {} ({}){}",
                p.x,
                p.y,
                p.outcome,
                p.color,
                label(p)
            )?;
        }
        Ok(())
    }
}
