use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bb_pool::pool::{PoolState, StatusChange};
use bb_pool::scoring::RuleStore;

const EXIT_SUCCESS: i32 = 0;
const EXIT_STORAGE: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_POOL: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a starter config and an empty pool file
    Init {
        /// Pool name
        #[arg(long, default_value = "My Pool")]
        name: String,
        /// Contestants drafted per team
        #[arg(long, default_value_t = 5)]
        picks: usize,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Check the scoring rules and pool file for problems
    Validate,
    /// Save a week's facts (YAML or JSON) as a draft
    Record {
        /// Path to the fact file
        file: PathBuf,
    },
    /// Show the points a week earns, without saving anything
    Preview {
        /// Week number
        week: u32,
        /// List every award behind the totals
        #[arg(short, long)]
        breakdown: bool,
    },
    /// Lock a draft week so it counts toward standings
    Finalize {
        /// Week number
        week: u32,
    },
    /// Team standings over finalized weeks (default if no subcommand)
    Standings {
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "bb-pool")]
#[command(about = "Weekly scoring for a Big Brother fantasy pool", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/bb-pool/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    bb_pool::logging::init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Standings { tsv: false });
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { name, picks, force } = &command {
        let path = config_path.unwrap_or_else(bb_pool::config::get_config_path);
        match bb_pool::config::write_starter_files(&path, name, *picks, *force) {
            Ok(outcome) => {
                for file in [&outcome.config, &outcome.pool] {
                    match file {
                        bb_pool::config::FileOutcome::Written(p) => {
                            println!("Wrote {}", p.display())
                        }
                        bb_pool::config::FileOutcome::Kept(p) => {
                            println!("Kept existing {} (use --force to overwrite)", p.display())
                        }
                    }
                }
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_STORAGE);
            }
        }
    }

    let config = match bb_pool::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring rules at startup
    let scoring = config.effective_scoring();
    if let Err(errors) = bb_pool::scoring::validate_rules(&scoring.effective_rules()) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let rules = scoring.rule_store();

    let pool_path = config.pool_path();
    let mut pool = match bb_pool::pool::load_pool_state(&pool_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Pool file error: {:#}", e);
            eprintln!("Fix or restore {} and try again.", pool_path.display());
            std::process::exit(EXIT_STORAGE);
        }
    };
    tracing::debug!(
        pool = %pool.name,
        contestants = pool.contestants.len(),
        teams = pool.teams.len(),
        weeks = pool.weeks.len(),
        "pool loaded"
    );

    let use_colors = bb_pool::output::should_use_colors();

    match command {
        Commands::Init { .. } => unreachable!("handled before config load"),
        Commands::Validate => {
            if let Err(errors) = pool.validate() {
                eprintln!("Pool errors in {}:", pool_path.display());
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_POOL);
            }
            println!(
                "OK: {} active rules, {} contestants, {} teams, {} weeks",
                rules.len(),
                pool.contestants.len(),
                pool.teams.len(),
                pool.weeks.len()
            );
        }
        Commands::Record { file } => {
            let fact = match bb_pool::pool::read_fact_file(&file) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let week = fact.week;
            if let Err(e) = pool.upsert_draft(fact) {
                eprintln!("Cannot record week {}: {}", week, e);
                std::process::exit(EXIT_POOL);
            }
            save_or_exit(&pool_path, &pool);
            println!("Saved week {} as draft.", week);
        }
        Commands::Preview { week, breakdown } => {
            print_preview(&pool, &rules, week, breakdown, use_colors);
        }
        Commands::Finalize { week } => {
            let changes = match pool.finalize_week(week, chrono::Utc::now()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Cannot finalize week {}: {}", week, e);
                    std::process::exit(EXIT_POOL);
                }
            };
            save_or_exit(&pool_path, &pool);
            println!("Week {} is final.", week);
            for change in changes {
                match change {
                    StatusChange::Evicted(name) => println!("  {} evicted", name),
                    StatusChange::Deactivated { name, event_type } => {
                        println!("  {} out ({})", name, event_type)
                    }
                    StatusChange::Revived(name) => println!("  {} back in the game", name),
                }
            }
        }
        Commands::Standings { tsv } => {
            let rows = pool.standings(&rules);
            if tsv {
                println!("{}", bb_pool::output::format_standings_tsv(&rows));
            } else {
                println!("{}", bb_pool::output::format_standings(&rows, use_colors));
            }
            let drafts = pool.weeks.iter().filter(|w| !w.is_final()).count();
            if drafts > 0 && !tsv {
                eprintln!("({} draft week(s) not counted)", drafts);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn print_preview(pool: &PoolState, rules: &RuleStore, week: u32, breakdown: bool, use_colors: bool) {
    let Some(record) = pool.week(week) else {
        eprintln!("Week {} has not been recorded.", week);
        std::process::exit(EXIT_POOL);
    };
    let Some(points) = pool.week_points(week, rules) else {
        eprintln!("Week {} has not been recorded.", week);
        std::process::exit(EXIT_POOL);
    };

    let status = if record.is_final() { "final" } else { "draft" };
    println!("Week {} ({})", week, status);
    println!(
        "{}",
        bb_pool::output::format_points_table(&points.points, use_colors)
    );
    if breakdown {
        println!();
        println!(
            "{}",
            bb_pool::output::format_breakdown(&points.contributions, use_colors)
        );
    }
}

fn save_or_exit(path: &std::path::Path, pool: &PoolState) {
    if let Err(e) = bb_pool::pool::save_pool_state(path, pool) {
        eprintln!("Failed to save pool: {:#}", e);
        std::process::exit(EXIT_STORAGE);
    }
}
