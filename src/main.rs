use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use pitchrank::allocation::{plan_round_one, plan_round_two, DomainLocks};
use pitchrank::config::{load_config, validate_config, Config};
use pitchrank::model::{Round, Team};
use pitchrank::output;
use pitchrank::scoring::{self, CohortSnapshot};
use pitchrank::snapshot::{self, LoadedEvent};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_ENGINE: i32 = 5;

fn parse_round(s: &str) -> Result<Round, String> {
    Round::parse(s).ok_or_else(|| format!("unknown round '{}' (expected 1 or 2)", s))
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an event snapshot and report scoring progress
    Check {
        /// Event snapshot file (.json, .yaml or .yml)
        snapshot: PathBuf,
    },
    /// Show the top teams of every domain by Round 1 average
    Rankings {
        snapshot: PathBuf,
        /// Teams per domain (defaults to cohort_size from config)
        #[arg(long)]
        top: Option<usize>,
        /// Include teams nobody has scored yet
        #[arg(long)]
        show_unscored: bool,
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Show which teams currently advance to Round 2
    Cohort {
        snapshot: PathBuf,
        /// Also list Qualified/Eliminated for every team
        #[arg(long)]
        statuses: bool,
    },
    /// Freeze the current Round 2 cohort to a file before allocating judges
    Freeze {
        snapshot: PathBuf,
        /// Output path (defaults to ~/.config/pitchrank/cohort-<event>.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Allocate judges to teams for a round
    Allocate {
        snapshot: PathBuf,
        #[arg(long, value_parser = parse_round)]
        round: Round,
        /// Domain to allocate (Round 1)
        #[arg(long)]
        domain: Option<String>,
        /// Comma-separated judge ids (Round 1)
        #[arg(long, value_delimiter = ',')]
        judges: Vec<String>,
        /// Frozen cohort file (Round 2)
        #[arg(long)]
        cohort: Option<PathBuf>,
        /// Print the assignment as JSON for the persistence layer
        #[arg(long)]
        json: bool,
    },
    /// Show the leaderboard for a round
    Standings {
        snapshot: PathBuf,
        #[arg(long, value_parser = parse_round)]
        round: Round,
        /// Limit a Round 1 leaderboard to one domain
        #[arg(long)]
        domain: Option<String>,
        /// Frozen cohort file (Round 2)
        #[arg(long)]
        cohort: Option<PathBuf>,
        #[arg(long)]
        tsv: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "pitchrank")]
#[command(about = "Pitch competition ranking and judge allocation", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/pitchrank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    pitchrank::telemetry::init_tracing(cli.verbose);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let snapshot_path = match &cli.command {
        Commands::Check { snapshot }
        | Commands::Rankings { snapshot, .. }
        | Commands::Cohort { snapshot, .. }
        | Commands::Freeze { snapshot, .. }
        | Commands::Allocate { snapshot, .. }
        | Commands::Standings { snapshot, .. } => snapshot.clone(),
    };

    let loaded = match snapshot::load_event_snapshot(&snapshot_path, &config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let use_colors = output::should_use_colors();
    let result = match cli.command {
        Commands::Check { .. } => run_check(&loaded),
        Commands::Rankings {
            top,
            show_unscored,
            tsv,
            ..
        } => run_rankings(&loaded, &config, top, show_unscored, tsv, use_colors),
        Commands::Cohort { statuses, .. } => run_cohort(&loaded, &config, statuses, use_colors),
        Commands::Freeze { out, .. } => run_freeze(&loaded, &config, out),
        Commands::Allocate {
            round,
            domain,
            judges,
            cohort,
            json,
            ..
        } => run_allocate(&loaded, round, domain, &judges, cohort, json, use_colors),
        Commands::Standings {
            round,
            domain,
            cohort,
            tsv,
            ..
        } => run_standings(&loaded, &config, round, domain, cohort, tsv, use_colors),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_ENGINE);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn event_teams(loaded: &LoadedEvent) -> Vec<&Team> {
    loaded
        .teams
        .iter()
        .filter(|t| t.event_id == loaded.event.id)
        .collect()
}

fn run_check(loaded: &LoadedEvent) -> anyhow::Result<()> {
    println!(
        "{}: {} teams, {} judges, {} scores",
        loaded.event.name,
        event_teams(loaded).len(),
        loaded.judges.len(),
        loaded.scores.len()
    );

    let round_one = scoring::round_progress(event_teams(loaded), &loaded.scores, Round::One);
    println!("{}", output::format_progress(&round_one));
    if !round_one.is_complete() {
        warn!(
            missing = round_one.unscored.len(),
            "Round 1 scoring is incomplete; rankings are partial"
        );
    }
    Ok(())
}

fn run_rankings(
    loaded: &LoadedEvent,
    config: &Config,
    top: Option<usize>,
    show_unscored: bool,
    tsv: bool,
    use_colors: bool,
) -> anyhow::Result<()> {
    let mut options = config.ranking_options();
    if let Some(n) = top {
        options.top_n = n;
    }
    options.show_unscored |= show_unscored;

    let round_one = scoring::scores_for(&loaded.scores, &loaded.event.id, Round::One);
    let rankings = scoring::domain_rankings(event_teams(loaded), &round_one, &options);

    if tsv {
        let flat: Vec<_> = rankings.iter().flat_map(|r| r.entries.iter().copied()).collect();
        println!("{}", output::format_tsv(&flat));
    } else {
        println!("{}", output::format_domain_rankings(&rankings, use_colors));
    }
    Ok(())
}

fn run_cohort(
    loaded: &LoadedEvent,
    config: &Config,
    statuses: bool,
    use_colors: bool,
) -> anyhow::Result<()> {
    let cohort = scoring::round_two_cohort_with(
        &loaded.teams,
        &loaded.scores,
        &loaded.event.id,
        config.cohort_size(),
    );
    println!("{}", output::format_cohort(&cohort, use_colors));

    let expected = loaded.event.domains.len() * config.cohort_size();
    if !cohort.is_empty() && cohort.len() < expected {
        warn!(
            size = cohort.len(),
            expected,
            "some domains have fewer scored teams than the cohort size"
        );
    }

    if statuses {
        let statuses = scoring::round_one_statuses(
            &loaded.teams,
            &loaded.scores,
            &loaded.event.id,
            config.cohort_size(),
        );
        println!();
        println!("{}", output::format_statuses(&statuses, use_colors));
    }
    Ok(())
}

fn run_freeze(loaded: &LoadedEvent, config: &Config, out: Option<PathBuf>) -> anyhow::Result<()> {
    let frozen = CohortSnapshot::freeze(
        &loaded.teams,
        &loaded.scores,
        &loaded.event.id,
        config.cohort_size(),
    )?;
    let path = match out {
        Some(p) => p,
        None => snapshot::default_cohort_path(&loaded.event.id)?,
    };
    snapshot::save_cohort_snapshot(&path, &frozen)?;

    info!(path = %path.display(), teams = frozen.team_ids.len(), "froze cohort");
    println!(
        "Froze {} teams for Round 2 to {}",
        frozen.team_ids.len(),
        path.display()
    );
    Ok(())
}

fn load_frozen_cohort(
    loaded: &LoadedEvent,
    path: Option<PathBuf>,
) -> anyhow::Result<CohortSnapshot> {
    let path = match path {
        Some(p) => p,
        None => snapshot::default_cohort_path(&loaded.event.id)?,
    };
    if !Path::new(&path).exists() {
        anyhow::bail!(
            "No frozen cohort at {}. Run `pitchrank freeze` before Round 2.",
            path.display()
        );
    }
    let frozen = snapshot::load_cohort_snapshot(&path)?;
    if frozen.event_id != loaded.event.id {
        anyhow::bail!(
            "Frozen cohort at {} belongs to event {}, not {}",
            path.display(),
            frozen.event_id,
            loaded.event.id
        );
    }
    info!(
        frozen = %output::format_age(chrono::Utc::now() - frozen.frozen_at),
        "using frozen cohort"
    );
    Ok(frozen)
}

fn run_allocate(
    loaded: &LoadedEvent,
    round: Round,
    domain: Option<String>,
    judges: &[String],
    cohort: Option<PathBuf>,
    json: bool,
    use_colors: bool,
) -> anyhow::Result<()> {
    let allocation = match round {
        Round::One => {
            let Some(domain) = domain else {
                anyhow::bail!("--domain is required for Round 1 allocation");
            };
            let locks = DomainLocks::from_teams(event_teams(loaded), Round::One);
            plan_round_one(
                &loaded.teams,
                &loaded.judges,
                &locks,
                &loaded.event.id,
                &domain,
                judges,
            )?
        }
        Round::Two => {
            let frozen = load_frozen_cohort(loaded, cohort)?;
            plan_round_two(frozen.teams(&loaded.teams), &loaded.judges)?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&allocation)?);
    } else {
        println!(
            "{}",
            output::format_allocation(&allocation, &loaded.teams, use_colors)
        );
    }
    Ok(())
}

fn run_standings(
    loaded: &LoadedEvent,
    config: &Config,
    round: Round,
    domain: Option<String>,
    cohort: Option<PathBuf>,
    tsv: bool,
    use_colors: bool,
) -> anyhow::Result<()> {
    let round_scores = scoring::scores_for(&loaded.scores, &loaded.event.id, round);
    let include_unscored = config.ranking_options().show_unscored;

    let (pool, statuses) = match round {
        Round::One => {
            let pool: Vec<&Team> = event_teams(loaded)
                .into_iter()
                .filter(|t| domain.as_ref().is_none_or(|d| &t.domain == d))
                .collect();
            (pool, None)
        }
        Round::Two => {
            let frozen = load_frozen_cohort(loaded, cohort)?;
            let pool = frozen.teams(&loaded.teams);
            let statuses = scoring::final_statuses(&pool, &loaded.scores, &loaded.event.id);
            (pool, Some(statuses))
        }
    };

    let progress = scoring::round_progress(pool.iter().copied(), &loaded.scores, round);
    if !progress.is_complete() {
        warn!("{}", output::format_progress(&progress));
    }

    let board = scoring::leaderboard(pool.iter().copied(), &round_scores, include_unscored);
    if tsv {
        println!("{}", output::format_tsv(&board));
        return Ok(());
    }

    println!("{}", output::format_ranked_table(&board, use_colors));
    if let Some(statuses) = statuses {
        println!();
        println!("{}", output::format_statuses(&statuses, use_colors));
    }
    Ok(())
}
