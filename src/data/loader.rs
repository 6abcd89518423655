//! Event table ingestion.
//!
//! Two shapes are accepted: the nested JSON emitted by the open-data
//! repository (one array per match), and flattened CSV tables where nested
//! attributes have been lifted into `shot_outcome`-style columns. Both end up
//! as [`Event`]s; rows that fail to decode are skipped with a warning.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::data::models::Event;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid event JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid event CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported event file format: {0}")]
    UnsupportedFormat(String),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Load events from a file, dispatching on its extension.
///
/// A JSON file named after a match (`3869685.json`) tags its events with that
/// match id, since the open-data event objects do not carry one.
pub fn load_events_file(path: &Path) -> LoadResult<Vec<Event>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let events = match ext.as_str() {
        "json" => load_events_json(file, match_id_from_path(path))?,
        "csv" => load_events_csv(file)?,
        _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
    };

    info!(path = %path.display(), events = events.len(), "Events loaded");
    Ok(events)
}

fn match_id_from_path(path: &Path) -> Option<u64> {
    path.file_stem()?.to_str()?.parse().ok()
}

// --- Open-data JSON ---

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<Named>,
    team: Option<Named>,
    player: Option<Named>,
    position: Option<Named>,
    location: Option<Value>,
    shot: Option<RawShot>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawShot {
    end_location: Option<Value>,
    outcome: Option<Named>,
    statsbomb_xg: Option<f64>,
}

impl RawEvent {
    fn into_event(self, match_id: Option<u64>) -> Event {
        let (shot_end_location, shot_outcome, shot_statsbomb_xg) = match self.shot {
            Some(shot) => (
                shot.end_location,
                shot.outcome.map(|o| o.name),
                shot.statsbomb_xg,
            ),
            None => (None, None, None),
        };

        Event {
            id: self.id,
            match_id,
            event_type: self.event_type.map(|t| t.name),
            team: self.team.map(|t| t.name),
            player: self.player.map(|p| p.name),
            position: self.position.map(|p| p.name),
            location: self.location,
            shot_end_location,
            shot_outcome,
            shot_statsbomb_xg,
        }
    }
}

/// Parse an open-data events array.
pub fn load_events_json<R: Read>(reader: R, match_id: Option<u64>) -> LoadResult<Vec<Event>> {
    let values: Vec<Value> = serde_json::from_reader(reader)?;
    Ok(events_from_values(values, match_id))
}

/// Convert already-parsed open-data event objects, skipping malformed ones.
pub fn events_from_values(values: Vec<Value>, match_id: Option<u64>) -> Vec<Event> {
    let mut events = Vec::with_capacity(values.len());
    for (i, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawEvent>(value) {
            Ok(raw) => events.push(raw.into_event(match_id)),
            Err(e) => {
                warn!(index = i, error = %e, "Skipping malformed event");
            }
        }
    }
    events
}

// --- Flattened CSV ---

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvEventRow {
    id: Option<String>,
    match_id: Option<u64>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    team: Option<String>,
    player: Option<String>,
    /// Column name used by statsbombpy-flattened tables.
    player_name: Option<String>,
    position: Option<String>,
    location: Option<String>,
    location_x: Option<f64>,
    location_y: Option<f64>,
    shot_end_location: Option<String>,
    shot_end_location_x: Option<f64>,
    shot_end_location_y: Option<f64>,
    shot_end_location_z: Option<f64>,
    shot_outcome: Option<String>,
    shot_statsbomb_xg: Option<f64>,
}

impl CsvEventRow {
    fn into_event(self) -> Event {
        let location = self
            .location
            .as_deref()
            .map(parse_location_cell)
            .or_else(|| split_location(self.location_x, self.location_y, None));

        let shot_end_location = self
            .shot_end_location
            .as_deref()
            .map(parse_location_cell)
            .or_else(|| {
                split_location(
                    self.shot_end_location_x,
                    self.shot_end_location_y,
                    self.shot_end_location_z,
                )
            });

        Event {
            id: self.id,
            match_id: self.match_id,
            event_type: self.event_type,
            team: self.team,
            player: self.player.or(self.player_name),
            position: self.position,
            location,
            shot_end_location,
            shot_outcome: self.shot_outcome,
            shot_statsbomb_xg: self.shot_statsbomb_xg,
        }
    }
}

/// List cells are written as `[61.0, 40.1]`. Anything that isn't JSON is kept
/// as a string, which the normalizer rejects.
fn parse_location_cell(cell: &str) -> Value {
    serde_json::from_str(cell.trim()).unwrap_or_else(|_| Value::String(cell.to_string()))
}

fn split_location(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Option<Value> {
    if x.is_none() && y.is_none() {
        return None;
    }
    let mut items = vec![opt_number(x), opt_number(y)];
    if let Some(z) = z {
        items.push(opt_number(Some(z)));
    }
    Some(Value::Array(items))
}

fn opt_number(v: Option<f64>) -> Value {
    v.and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Parse a flattened event table with a header row.
pub fn load_events_csv<R: Read>(reader: R) -> LoadResult<Vec<Event>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let mut events = Vec::new();
    for (i, result) in rdr.deserialize::<CsvEventRow>().enumerate() {
        match result {
            Ok(row) => events.push(row.into_event()),
            Err(e) => {
                // +2: header row, 1-based lines
                warn!(line = i + 2, error = %e, "Skipping malformed CSV row");
            }
        }
    }

    Ok(events)
}
