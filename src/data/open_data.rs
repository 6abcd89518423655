//! StatsBomb open-data client.
//!
//! Reads the static JSON layout of the open-data repository:
//! `competitions.json`, `matches/<competition>/<season>.json` and
//! `events/<match>.json`. Downloaded event files are kept on disk so repeat
//! reports for the same match skip the network.
//!
//! Whole seasons are fetched match by match and concatenated, which is what
//! gives per-game averages more than one game to work with.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::OpenDataConfig;
use crate::data::loader::events_from_values;
use crate::data::models::{Competition, Event, MatchInfo};

pub struct OpenDataClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenDataClient {
    pub fn new(config: &OpenDataConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url(path);
        debug!(url = %url, "Fetching open data");
        let bytes = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Open-data request failed: {url}"))?
            .error_for_status()
            .with_context(|| format!("Open-data request rejected: {url}"))?
            .bytes()
            .await
            .with_context(|| format!("Failed to read open-data response: {url}"))?;
        Ok(bytes.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self.get_bytes(path).await?;
        serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse {path}"))
    }

    pub async fn competitions(&self) -> Result<Vec<Competition>> {
        let competitions: Vec<Competition> = self.get_json("competitions.json").await?;
        info!(count = competitions.len(), "Competitions fetched");
        Ok(competitions)
    }

    pub async fn matches(&self, competition_id: u64, season_id: u64) -> Result<Vec<MatchInfo>> {
        let raw: Vec<RawMatch> = self
            .get_json(&format!("matches/{competition_id}/{season_id}.json"))
            .await?;
        let matches: Vec<MatchInfo> = raw.into_iter().map(RawMatch::into_match).collect();
        info!(
            competition_id,
            season_id,
            count = matches.len(),
            "Matches fetched"
        );
        Ok(matches)
    }

    pub async fn events(&self, match_id: u64) -> Result<Vec<Event>> {
        let values: Vec<Value> = self.get_json(&format!("events/{match_id}.json")).await?;
        Ok(events_from_values(values, Some(match_id)))
    }

    /// Fetch every match of a competition season and concatenate their events,
    /// each tagged with its match id. A match whose events fail to load is
    /// skipped with a warning.
    pub async fn season_events(&self, competition_id: u64, season_id: u64) -> Result<Vec<Event>> {
        let matches = self.matches(competition_id, season_id).await?;

        let mut all_events = Vec::new();
        for m in &matches {
            match self.events(m.match_id).await {
                Ok(events) => {
                    debug!(match_id = m.match_id, events = events.len(), "Match events fetched");
                    all_events.extend(events);
                }
                Err(e) => {
                    warn!(match_id = m.match_id, error = %e, "Skipping match events");
                }
            }
        }

        info!(
            competition_id,
            season_id,
            matches = matches.len(),
            events = all_events.len(),
            "Season events fetched"
        );
        Ok(all_events)
    }

    /// Download a match's events to `dest`.
    ///
    /// A cached file is reused only if it still parses as an events array; a
    /// truncated or corrupt one is fetched again. The body is written to a
    /// sibling temp file and renamed into place.
    pub async fn download_events(&self, match_id: u64, dest: &Path) -> Result<PathBuf> {
        if is_cached_events(dest).await {
            info!(path = %dest.display(), "Events already downloaded");
            return Ok(dest.to_path_buf());
        }

        let bytes = self.get_bytes(&format!("events/{match_id}.json")).await?;
        // Reject non-JSON bodies before they land in the data dir.
        serde_json::from_slice::<Vec<Value>>(&bytes)
            .with_context(|| format!("Events for match {match_id} are not a JSON array"))?;

        if let Some(dir) = dest.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let mut tmp = dest.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, dest)
            .await
            .with_context(|| format!("Failed to move {} into place", tmp.display()))?;

        info!(match_id, path = %dest.display(), bytes = bytes.len(), "Events downloaded");
        Ok(dest.to_path_buf())
    }
}

async fn is_cached_events(path: &Path) -> bool {
    let Ok(bytes) = tokio::fs::read(path).await else {
        return false;
    };
    match serde_json::from_slice::<Vec<Value>>(&bytes) {
        Ok(_) => true,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Cached events are unreadable, fetching again"
            );
            false
        }
    }
}

// --- Open-data response types ---

#[derive(Debug, serde::Deserialize)]
struct RawMatch {
    match_id: u64,
    match_date: Option<String>,
    home_team: RawHomeTeam,
    away_team: RawAwayTeam,
    home_score: Option<u32>,
    away_score: Option<u32>,
}

#[derive(Debug, serde::Deserialize)]
struct RawHomeTeam {
    home_team_name: String,
}

#[derive(Debug, serde::Deserialize)]
struct RawAwayTeam {
    away_team_name: String,
}

impl RawMatch {
    fn into_match(self) -> MatchInfo {
        MatchInfo {
            match_id: self.match_id,
            match_date: self.match_date,
            home_team: self.home_team.home_team_name,
            away_team: self.away_team.away_team_name,
            home_score: self.home_score,
            away_score: self.away_score,
        }
    }
}
