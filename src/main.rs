use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tipster_board::api::state::AppState;
use tipster_board::calculate::{
    build_racecard, classify_all, filter_and_sort_past, filter_window, format_currency, ordinal,
    rank_reviews, OrderingMode, ReviewBoard,
};
use tipster_board::config::AppConfig;
use tipster_board::models::{CompId, Metric, RaceNo, RacedayId, TipsterId};
use tipster_board::storage::{list_comps, CompetitionSnapshot, StorageConfig};

#[derive(Parser)]
#[command(name = "tipster-board")]
#[command(about = "Tipster competition leaderboards, raceday windows and tip consensus")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print a raceday leaderboard
    Leaderboard {
        /// Competition id
        #[arg(long)]
        comp: i64,

        /// Raceday id
        #[arg(long)]
        raceday: i64,

        /// Rank on "points" or "odds"
        #[arg(long, default_value = "points")]
        metric: Metric,

        /// Rows to show (defaults to the initial page)
        #[arg(long)]
        loaded: Option<usize>,

        /// Highlight this tipster
        #[arg(long)]
        tipster: Option<i64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List stored competitions
    Comps,

    /// List a competition's racedays with their status
    Racedays {
        /// Competition id
        #[arg(long)]
        comp: i64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the tips, points and odds tables for a raceday
    Review {
        /// Competition id
        #[arg(long)]
        comp: i64,

        /// Raceday id
        #[arg(long)]
        raceday: i64,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Print the racecard for a raceday: results, next to jump and tip consensus
    Races {
        /// Competition id
        #[arg(long)]
        comp: i64,

        /// Raceday id
        #[arg(long)]
        raceday: i64,

        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Import a competition snapshot (JSON with racedays, races and reviews)
    Import {
        /// Snapshot file
        #[arg(long)]
        file: PathBuf,

        /// Competition id to store it under
        #[arg(long)]
        comp: i64,
    },
}

fn load_comp(storage: &StorageConfig, comp: i64) -> Result<CompetitionSnapshot> {
    CompetitionSnapshot::load(storage, CompId::new(comp))
        .with_context(|| format!("Failed to load competition {}", comp))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let log_level = cli.log_level.unwrap_or_else(|| config.log_level.clone());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(cli.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Starting tipster-board v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState::new(storage, config)?;
            let app = tipster_board::api::build_router(state);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Leaderboard {
            comp,
            raceday,
            metric,
            loaded,
            tipster,
            json,
        } => {
            let paginator = config.paginator()?;
            let snapshot = load_comp(&storage, comp)?;
            let raceday_id = RacedayId::new(raceday);
            let day = snapshot
                .raceday(raceday_id)
                .with_context(|| format!("Raceday {} not found", raceday_id))?;

            let ranked = rank_reviews(
                &snapshot.reviews_for(raceday_id),
                metric,
                OrderingMode::Leaderboard,
            )?;
            let page = paginator.paginate(&ranked, loaded.unwrap_or(0));

            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
                return Ok(());
            }

            println!("{} ({}) - {} leaderboard", day.name, day.date, metric);
            let current = tipster.map(TipsterId::new);
            for row in &page.visible {
                let marker = if Some(row.entity.id) == current { "*" } else { " " };
                let total = match metric {
                    Metric::Points => format!("{}", row.total),
                    Metric::Odds => format_currency(row.total),
                };
                println!(
                    "{} {:>5}  {:<24} {:>12}",
                    marker,
                    ordinal(row.rank),
                    row.entity.display_name,
                    total
                );
            }
            if page.has_more {
                println!("  ... {} more", page.remaining_count);
            }
        }
        Commands::Comps => {
            let comps = list_comps(&storage)?;
            if comps.is_empty() {
                println!("No competitions in {}", storage.data_dir.display());
            }
            for comp in comps {
                let snapshot = load_comp(&storage, comp.get())?;
                println!("{:>6}  {} racedays", comp, snapshot.racedays.len());
            }
        }
        Commands::Racedays { comp, json } => {
            let reference = config.resolve_reference_date()?;
            let mut racedays = load_comp(&storage, comp)?.racedays;
            racedays.sort_by_key(|r| r.id);

            let all = classify_all(&racedays, reference);
            let live = filter_window(&all, reference, config.window_spec());
            let past = filter_and_sort_past(&all, reference);

            if json {
                let out = serde_json::json!({
                    "reference_date": reference,
                    "live": live,
                    "past": past,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!("Racedays as of {}", reference);
            println!("\nLive:");
            for r in &live {
                println!(
                    "  {:<10} {}  {:<24} {}",
                    r.status.to_string(),
                    r.raceday.date,
                    r.raceday.name,
                    r.raceday.track_name
                );
            }
            println!("\nPast:");
            for r in &past {
                println!(
                    "  {}  {:<24} {}",
                    r.raceday.date, r.raceday.name, r.raceday.track_name
                );
            }
        }
        Commands::Review {
            comp,
            raceday,
            json,
        } => {
            let snapshot = load_comp(&storage, comp)?;
            let raceday_id = RacedayId::new(raceday);
            let day = snapshot
                .raceday(raceday_id)
                .with_context(|| format!("Raceday {} not found", raceday_id))?;

            let race_numbers: Vec<RaceNo> = snapshot
                .races_for(raceday_id)
                .iter()
                .map(|r| r.race_no)
                .collect();
            let board = ReviewBoard::build(&snapshot.reviews_for(raceday_id), &race_numbers)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&board)?);
                return Ok(());
            }

            println!("{} ({}) review", day.name, day.date);
            let header: String = board
                .race_numbers
                .iter()
                .map(|n| format!("{:>8}", format!("R{}", n)))
                .collect();

            println!("\nTips\n      {:<20}{}", "", header);
            for row in &board.tips_table {
                let cells: String = board
                    .race_numbers
                    .iter()
                    .map(|&n| format!("{:>8}", row.tip_cell(n)))
                    .collect();
                println!("      {:<20}{}", row.nickname, cells);
            }

            println!("\nPoints\n      {:<20}{}{:>8}", "", header, "Total");
            for row in &board.points_table {
                let cells: String = board
                    .race_numbers
                    .iter()
                    .map(|&n| format!("{:>8}", row.points_cell(n)))
                    .collect();
                let rank = row.rank.map(ordinal).unwrap_or_default();
                println!(
                    "{:>5} {:<20}{}{:>8}",
                    rank,
                    row.nickname,
                    cells,
                    row.points_total_cell()
                );
            }

            println!("\nOdds\n      {:<20}{}{:>10}", "", header, "Return");
            for row in &board.odds_table {
                let cells: String = board
                    .race_numbers
                    .iter()
                    .map(|&n| format!("{:>8}", row.odds_cell(n)))
                    .collect();
                let rank = row.rank.map(ordinal).unwrap_or_default();
                println!(
                    "{:>5} {:<20}{}{:>10}",
                    rank,
                    row.nickname,
                    cells,
                    row.odds_total_cell()
                );
            }
        }
        Commands::Races {
            comp,
            raceday,
            json,
        } => {
            let snapshot = load_comp(&storage, comp)?;
            let raceday_id = RacedayId::new(raceday);
            let day = snapshot
                .raceday(raceday_id)
                .with_context(|| format!("Raceday {} not found", raceday_id))?;

            let card = build_racecard(
                &snapshot.races_for(raceday_id),
                &snapshot.reviews_for(raceday_id),
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&card)?);
                return Ok(());
            }

            println!("{} ({}) racecard", day.name, day.date);
            for summary in &card.races {
                println!("\nRace {}  {}", summary.race.race_no, summary.status);
                for line in &summary.results {
                    println!(
                        "  {:>4}  {:>3} {:<24} {:>8} {:>8}",
                        line.place, line.runner_no, line.runner_name, line.win_odds, line.place_odds
                    );
                }
                if let Some(consensus) = &summary.consensus {
                    for votes in consensus.runners.iter().filter(|v| v.tipster_count > 0) {
                        println!(
                            "  {:>3} {:<24} {} tips",
                            votes.runner_no, votes.runner_name, votes.tipster_count
                        );
                    }
                }
            }
            if card.day_complete {
                println!("\nAll races run");
            }
        }
        Commands::Import { file, comp } => {
            let snapshot = CompetitionSnapshot::from_json_file(&file)
                .with_context(|| format!("Failed to read snapshot {}", file.display()))?;
            let summary = snapshot.import(&storage, CompId::new(comp))?;
            println!(
                "Imported competition {}: {} racedays, {} races, {} reviews",
                comp, summary.racedays, summary.races, summary.reviews
            );
        }
    }

    Ok(())
}
