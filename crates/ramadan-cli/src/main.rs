mod calendar;
mod context;
mod place;
mod render;
mod settings;
mod today;
mod watch;

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ramadan_core::{CalendarSystem, Locale, Prayer};
use tracing_subscriber::EnvFilter;

use crate::context::AppContext;
use crate::settings::SettingsCommands;

#[derive(Debug, Parser)]
#[command(name = "ramadan")]
#[command(about = "Prayer times, Iftar countdown and Ramadan schedules")]
struct Cli {
    /// Output language (en or ar); defaults to RAMADAN_LOCALE
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show today's timetable, the next prayer and the weather
    Today,
    /// Live countdown to the next prayer
    Watch,
    /// Show a month of prayer times
    Calendar {
        /// Month number in the chosen calendar
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        /// Year in the chosen calendar
        #[arg(long)]
        year: Option<i32>,
        /// Use the Hijri calendar (remembered for later runs)
        #[arg(long, conflicts_with = "gregorian")]
        hijri: bool,
        /// Use the Gregorian calendar (remembered for later runs)
        #[arg(long)]
        gregorian: bool,
    },
    /// Convert a Gregorian date to the Hijri calendar
    Hijri {
        /// Date as dd-mm-yyyy; defaults to today
        #[arg(long, value_parser = parse_dmy)]
        date: Option<NaiveDate>,
    },
    /// Show current weather and the forecast
    Weather,
    /// Show which location would be used and how it was found
    Locate,
    /// List countries for manual location
    Countries,
    /// List cities of a country
    Cities {
        country: String,
    },
    /// View or change calculation settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Show or dismiss the accuracy notice
    Disclaimer {
        #[arg(long)]
        dismiss: bool,
    },
    /// Write a calendar event for one of today's prayers
    Export {
        /// Prayer to export; defaults to the next prayer
        #[arg(long)]
        prayer: Option<Prayer>,
        /// Event length in minutes
        #[arg(long, default_value = "30")]
        duration_mins: u32,
        /// Output file; defaults to <prayer>.ics in the working directory
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn calendar_frame(hijri: bool, gregorian: bool) -> Option<CalendarSystem> {
    match (hijri, gregorian) {
        (true, _) => Some(CalendarSystem::Hijri),
        (_, true) => Some(CalendarSystem::Gregorian),
        _ => None,
    }
}

fn parse_dmy(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%d-%m-%Y")
        .map_err(|e| format!("expected dd-mm-yyyy: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ramadan_core::load_app_config().context("loading configuration")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let locale = cli.locale.unwrap_or(config.locale);
    let ctx = AppContext::new(config);

    match cli.command {
        Some(Commands::Today) | None => today::run_today(&ctx, locale).await?,
        Some(Commands::Watch) => watch::run_watch(&ctx, locale).await?,
        Some(Commands::Calendar {
            month,
            year,
            hijri,
            gregorian,
        }) => {
            let frame = calendar_frame(hijri, gregorian);
            calendar::run_calendar(&ctx, locale, frame, month, year).await?;
        }
        Some(Commands::Hijri { date }) => calendar::run_hijri(&ctx, date).await?,
        Some(Commands::Weather) => place::run_weather(&ctx, locale).await?,
        Some(Commands::Locate) => place::run_locate(&ctx).await?,
        Some(Commands::Countries) => place::run_countries(&ctx).await?,
        Some(Commands::Cities { country }) => place::run_cities(&ctx, &country).await?,
        Some(Commands::Settings { command }) => settings::run_settings(&ctx, command)?,
        Some(Commands::Disclaimer { dismiss }) => settings::run_disclaimer(&ctx, dismiss)?,
        Some(Commands::Export {
            prayer,
            duration_mins,
            output,
        }) => today::run_export(&ctx, prayer, duration_mins, output).await?,
    }

    Ok(())
}
