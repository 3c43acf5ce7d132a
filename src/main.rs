//! `pos` command line front end.

use std::sync::Arc;

use chrono::{FixedOffset, Local, NaiveDate, NaiveTime, Offset};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pos_client::catalog::{filter_available, filter_by_meal_time, search};
use pos_client::models::{DateRange, Dish, Shift};
use pos_client::{ApiClient, Config, MealSchedule, Session, SqliteTokenStore};

#[derive(Parser)]
#[command(name = "pos")]
#[command(about = "Restaurant point-of-sale client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session tokens
    Login {
        username: String,
        /// Read from POS_PASSWORD when omitted
        #[arg(long, env = "POS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session tokens
    Logout,
    /// List dishes, optionally filtered by name and serving time
    Menu {
        #[arg(long, default_value = "")]
        query: String,
        /// Only dishes served at this local time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveTime>,
        /// Include dishes marked unavailable
        #[arg(long)]
        all: bool,
    },
    /// Dashboard summary for one local day
    Dashboard {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Orders placed on one local day
    History {
        #[arg(long)]
        date: NaiveDate,
        /// Offset of the local day from UTC; defaults to this machine's offset
        #[arg(long, allow_hyphen_values = true)]
        utc_offset_minutes: Option<i32>,
    },
    /// Totals for one shift
    ShiftReport {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        shift: Shift,
    },
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| format!("Expected HH:MM: {}", e))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn local_offset(minutes: Option<i32>) -> Result<FixedOffset, Box<dyn std::error::Error>> {
    match minutes {
        Some(minutes) => FixedOffset::east_opt(minutes * 60)
            .ok_or_else(|| format!("Invalid UTC offset: {} minutes", minutes).into()),
        None => Ok(Local::now().offset().fix()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Backend: {}", config.base_url);
    tracing::debug!("Session database: {:?}", config.session_db_path);

    let store = SqliteTokenStore::open(&config.session_db_path).await?;
    let session = Arc::new(Session::restore(store).await?);
    let client = ApiClient::new(&config, session)?;

    match cli.command {
        Commands::Login { username, password } => {
            client.login(&username, &password).await?;
            println!("Logged in as {}", username);
        }
        Commands::Logout => {
            client.logout().await?;
            println!("Logged out");
        }
        Commands::Menu { query, at, all } => {
            let mut dishes = client.list_dishes().await?;
            if !all {
                dishes = filter_available(&dishes).into_iter().cloned().collect();
            }
            let served: Vec<Dish> = match at {
                Some(time) => filter_by_meal_time(&dishes, &MealSchedule::default(), time)
                    .into_iter()
                    .cloned()
                    .collect(),
                None => dishes,
            };
            print_json(&search(&served, &query))?;
        }
        Commands::Dashboard { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let range = DateRange::local_day(date, local_offset(None)?);
            print_json(&client.dashboard_summary(&range).await?)?;
        }
        Commands::History {
            date,
            utc_offset_minutes,
        } => {
            let range = DateRange::local_day(date, local_offset(utc_offset_minutes)?);
            print_json(&client.order_history(&range).await?)?;
        }
        Commands::ShiftReport { date, shift } => {
            print_json(&client.shift_report(date, shift).await?)?;
        }
    }

    Ok(())
}
