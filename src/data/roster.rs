//! Team and player listings derived from an event table.

use serde::Serialize;

use crate::data::models::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub player: String,
    pub position: Option<String>,
}

/// Distinct team names in first-seen order.
pub fn teams(events: &[Event]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for team in events.iter().filter_map(|e| e.team.as_deref()) {
        if !out.iter().any(|t| t == team) {
            out.push(team.to_string());
        }
    }
    out
}

/// Distinct player/position pairs for one team, in first-seen order.
///
/// A player who appears in several positions is listed once per position.
pub fn roster(events: &[Event], team: &str) -> Vec<RosterEntry> {
    let mut out: Vec<RosterEntry> = Vec::new();
    for event in events.iter().filter(|e| e.team.as_deref() == Some(team)) {
        let Some(player) = event.player.as_deref() else {
            continue;
        };
        let position = event.position.as_deref();
        let seen = out
            .iter()
            .any(|r| r.player == player && r.position.as_deref() == position);
        if !seen {
            out.push(RosterEntry {
                player: player.to_string(),
                position: position.map(String::from),
            });
        }
    }
    out
}
