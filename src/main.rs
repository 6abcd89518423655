use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use shot_report::config::AppConfig;
use shot_report::data::open_data::OpenDataClient;
use shot_report::data::roster;
use shot_report::data::source::{load_or_empty, EventSource};
use shot_report::monitoring::logger;
use shot_report::report::{analyze, ReportScope};

#[derive(Debug, Parser)]
#[command(name = "shot-report", about = "Player and team shooting reports from match event data")]
struct Cli {
    /// Config file (defaults to $SHOT_REPORT_CONFIG or config/default.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List competitions and seasons available in the open-data repository
    Competitions,
    /// List matches for a competition season
    Matches {
        #[arg(long)]
        competition_id: u64,
        #[arg(long)]
        season_id: u64,
    },
    /// Download a match's events into the data directory
    Fetch {
        #[arg(long)]
        match_id: u64,
    },
    /// List the teams in an event table
    Teams {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List a team's players and positions
    Roster {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        team: String,
    },
    /// Build a shooting report for a team or player
    Report {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        team: String,
        #[arg(long)]
        player: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Where events come from: explicit files, matches in the data directory, or
/// a whole competition season.
#[derive(Debug, Args)]
struct SourceArgs {
    /// Event file (.json open-data array or flattened .csv); repeatable
    #[arg(long, conflicts_with_all = ["match_id", "competition_id"])]
    events: Vec<PathBuf>,
    /// Match id, downloaded first if not already in the data directory; repeatable
    #[arg(long, conflicts_with = "competition_id")]
    match_id: Vec<u64>,
    /// Competition of a season to load in full
    #[arg(long, requires = "season_id")]
    competition_id: Option<u64>,
    #[arg(long, requires = "competition_id")]
    season_id: Option<u64>,
}

impl SourceArgs {
    fn into_source(self) -> Result<EventSource> {
        if let (Some(competition_id), Some(season_id)) = (self.competition_id, self.season_id) {
            return Ok(EventSource::Season {
                competition_id,
                season_id,
            });
        }
        if !self.match_id.is_empty() {
            return Ok(EventSource::Matches(self.match_id));
        }
        if !self.events.is_empty() {
            return Ok(EventSource::Files(self.events));
        }
        bail!("Provide --events <file>, --match-id <id>, or --competition-id with --season-id")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    logger::init_logging(&config.monitoring)?;

    tracing::debug!(data_dir = %config.data.dir.display(), "shot-report starting");

    match cli.command {
        Command::Competitions => list_competitions(&config).await,
        Command::Matches {
            competition_id,
            season_id,
        } => list_matches(&config, competition_id, season_id).await,
        Command::Fetch { match_id } => {
            let path = fetch_match(&config, match_id).await?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Teams { source } => {
            let events = load_or_empty(&config, &source.into_source()?).await;
            let teams = roster::teams(&events);
            if teams.is_empty() {
                println!("No data");
            }
            for team in teams {
                println!("{team}");
            }
            Ok(())
        }
        Command::Roster { source, team } => {
            let events = load_or_empty(&config, &source.into_source()?).await;
            let entries = roster::roster(&events, &team);
            if entries.is_empty() {
                println!("No data for {team}");
            }
            for entry in entries {
                match entry.position {
                    Some(position) => println!("{}\t{position}", entry.player),
                    None => println!("{}", entry.player),
                }
            }
            Ok(())
        }
        Command::Report {
            source,
            team,
            player,
            json,
        } => {
            let events = load_or_empty(&config, &source.into_source()?).await;
            let scope = match player {
                Some(p) => ReportScope::team(team).with_player(p),
                None => ReportScope::team(team),
            };
            let report = analyze(&events, &scope);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.is_empty() {
                println!("No data for {scope}");
            } else {
                println!("{report}");
            }
            Ok(())
        }
    }
}

async fn list_competitions(config: &AppConfig) -> Result<()> {
    let client = OpenDataClient::new(&config.open_data)?;
    for c in client.competitions().await? {
        println!(
            "{}\t{}\t{} {}",
            c.competition_id, c.season_id, c.competition_name, c.season_name
        );
    }
    Ok(())
}

async fn list_matches(config: &AppConfig, competition_id: u64, season_id: u64) -> Result<()> {
    let client = OpenDataClient::new(&config.open_data)?;
    let matches = client.matches(competition_id, season_id).await?;
    if matches.is_empty() {
        println!("No matches found for competition {competition_id} season {season_id}");
    }
    for m in matches {
        println!("{}\t{}\t{m}", m.match_id, m.match_date.as_deref().unwrap_or("-"));
    }
    Ok(())
}

async fn fetch_match(config: &AppConfig, match_id: u64) -> Result<PathBuf> {
    let client = OpenDataClient::new(&config.open_data)?;
    client
        .download_events(match_id, &config.data.match_events_path(match_id))
        .await
}
