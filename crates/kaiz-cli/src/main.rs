//! Kaiz CLI
//!
//! Command-line interface for recording customer-site visits

use clap::{Parser, Subcommand};
use kaiz_core::logging_facility::{self, Profile};
use kaiz_store::VisitStore;
use std::path::PathBuf;

mod commands;
mod config;
mod output;
mod prompt;

const BANNER: &str = "Sales Engineer's CLI tool - track business visits and customer data";

#[derive(Debug, Parser)]
#[command(name = "kaiz")]
#[command(about = "Kaiz - track business visits and customer data", long_about = None)]
struct Cli {
    /// Database file (overrides database.path from config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a new visit record to the database
    Add(commands::add::AddArgs),
    /// Change selected columns of an existing visit
    Update(commands::update::UpdateArgs),
    /// Show every recorded field of one visit
    Show(commands::show::ShowArgs),
    /// List visits, newest first
    List(commands::list::ListArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    eprintln!("{}", BANNER);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let app_config = config::AppConfig::load()?;
    if app_config.logging.enabled {
        let profile: Profile = app_config.logging.profile.parse()?;
        logging_facility::init(profile);
    }

    let db_path = cli.db.unwrap_or(app_config.database.path);
    tracing::debug!(db = %db_path.display(), "opening visit store");
    let mut store = VisitStore::open(&db_path)?;

    match cli.command {
        Commands::Add(args) => {
            let stdin = std::io::stdin();
            commands::add::execute(args, &mut store, &mut stdin.lock(), &mut std::io::stderr())
        }
        Commands::Update(args) => commands::update::execute(args, &mut store),
        Commands::Show(args) => commands::show::execute(args, &store),
        Commands::List(args) => commands::list::execute(args, &store),
    }
}
