//! Resolving where a command's events come from.
//!
//! Local files are read directly; match ids are downloaded into the data
//! directory first; a competition season is fetched match by match. Several
//! files or matches are concatenated into one table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::data::loader::load_events_file;
use crate::data::models::Event;
use crate::data::open_data::OpenDataClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    Files(Vec<PathBuf>),
    Matches(Vec<u64>),
    Season { competition_id: u64, season_id: u64 },
}

pub async fn load_events(config: &AppConfig, source: &EventSource) -> Result<Vec<Event>> {
    let events = match source {
        EventSource::Files(paths) => {
            let mut events = Vec::new();
            for path in paths {
                let loaded = load_events_file(path)
                    .with_context(|| format!("Failed to load events from {}", path.display()))?;
                events.extend(loaded);
            }
            events
        }
        EventSource::Matches(match_ids) => {
            let client = OpenDataClient::new(&config.open_data)?;
            let mut events = Vec::new();
            for &match_id in match_ids {
                let dest = config.data.match_events_path(match_id);
                let path = client.download_events(match_id, &dest).await?;
                let loaded = load_events_file(&path)
                    .with_context(|| format!("Failed to load events from {}", path.display()))?;
                events.extend(loaded);
            }
            events
        }
        EventSource::Season {
            competition_id,
            season_id,
        } => {
            let client = OpenDataClient::new(&config.open_data)?;
            client.season_events(*competition_id, *season_id).await?
        }
    };

    info!(source = ?source, events = events.len(), "Events loaded");
    Ok(events)
}

/// Like [`load_events`], but an unreachable or missing source yields an empty
/// table so callers can show a "no data" state instead of failing.
pub async fn load_or_empty(config: &AppConfig, source: &EventSource) -> Vec<Event> {
    match load_events(config, source).await {
        Ok(events) => events,
        Err(e) => {
            warn!(source = ?source, error = %format!("{e:#}"), "No events available");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_dir(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::from_toml(include_str!("../../config/default.toml")).unwrap();
        config.data.dir = dir.to_path_buf();
        config
    }

    #[tokio::test]
    async fn test_files_are_concatenated() {
        let dir = std::env::temp_dir().join(format!("shot_report_source_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let shot = r#"[{"type": {"name": "Shot"}, "team": {"name": "A"}, "location": [100, 40]}]"#;
        std::fs::write(dir.join("1.json"), shot).unwrap();
        std::fs::write(dir.join("2.json"), shot).unwrap();

        let source = EventSource::Files(vec![dir.join("1.json"), dir.join("2.json")]);
        let events = load_events(&config_with_dir(&dir), &source).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].match_id, Some(1));
        assert_eq!(events[1].match_id, Some(2));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_file_loads_as_empty() {
        let dir = std::env::temp_dir().join("shot_report_source_missing");
        let source = EventSource::Files(vec![dir.join("nope.json")]);
        let config = config_with_dir(&dir);
        assert!(load_events(&config, &source).await.is_err());
        assert!(load_or_empty(&config, &source).await.is_empty());
    }
}
