//! Headline shooting statistics.
//!
//! All ratios special-case a zero denominator to 0 so the output is always a
//! well-formed record, even for an empty selection.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::data::models::Event;
use crate::shots::ShotRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateMetrics {
    pub shots_taken: u64,
    pub shots_on_target: u64,
    pub goals: u64,
    /// Percentage in `[0, 100]`.
    pub conversion_rate: f64,
    pub expected_goals: f64,
}

/// Compute the five headline statistics over one scope's shots.
pub fn aggregate(shots: &[ShotRecord]) -> AggregateMetrics {
    let shots_taken = shots.len() as u64;
    let shots_on_target = shots.iter().filter(|s| s.outcome.is_on_target()).count() as u64;
    let goals = shots.iter().filter(|s| s.outcome.is_goal()).count() as u64;

    AggregateMetrics {
        shots_taken,
        shots_on_target,
        goals,
        conversion_rate: percentage(goals, shots_taken),
        expected_goals: sum_xg(shots),
    }
}

/// Sum xG in a fixed order so the total does not depend on input order.
///
/// Floating-point addition is not associative; sorting first makes the result
/// bit-identical for any permutation of the same shots.
fn sum_xg(shots: &[ShotRecord]) -> f64 {
    let mut values: Vec<f64> = shots.iter().map(|s| s.xg).collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

/// `numerator / denominator * 100`, or 0 when there is nothing to divide by.
pub fn percentage(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}

/// Number of distinct matches among the events.
///
/// A non-empty table in which no event carries a match id (a single match
/// file saved under an arbitrary name) counts as one game. Untagged events
/// mixed with tagged ones are not counted.
pub fn games_played<'e, I>(events: I) -> u64
where
    I: IntoIterator<Item = &'e Event>,
{
    let mut matches = BTreeSet::new();
    let mut untagged = false;
    for event in events {
        match event.match_id {
            Some(id) => {
                matches.insert(id);
            }
            None => untagged = true,
        }
    }
    if matches.is_empty() && untagged {
        return 1;
    }
    matches.len() as u64
}

pub fn goals_per_game(goals: u64, games_played: u64) -> f64 {
    if games_played == 0 {
        return 0.0;
    }
    goals as f64 / games_played as f64
}
