//! Settings and disclaimer handlers.
//!
//! Every change goes through the store; a running `watch` loop picks it up
//! from the file and re-fetches.

use anyhow::Context as _;
use clap::{Args, Subcommand};
use ramadan_core::{CalculationMethod, CalculationSettings, LocationMode, Prayer};

use crate::context::AppContext;
use crate::render;

/// Sub-commands available under `settings`.
#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Print the stored settings
    Show,
    /// Change one or more settings
    Set(SettingsUpdate),
    /// Restore the defaults
    Reset,
}

#[derive(Debug, Default, Args)]
pub struct SettingsUpdate {
    /// `geo` (device/IP location) or `manual` (city and country)
    #[arg(long)]
    pub mode: Option<LocationMode>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    /// Calculation method by name (MWL, ISNA, Egypt, ...) or id
    #[arg(long)]
    pub method: Option<String>,
    /// Ask for a device position before falling back to IP lookup
    #[arg(long)]
    pub high_precision: Option<bool>,
    /// Minute offset for a prayer, e.g. `maghrib=2` or `fajr=-5` (repeatable)
    #[arg(long = "offset", value_parser = parse_offset)]
    pub offsets: Vec<(Prayer, i32)>,
    #[arg(long)]
    pub notifications: Option<bool>,
    /// Minutes before Fajr for the Suhoor reminder (10..=90, steps of 5)
    #[arg(long)]
    pub suhoor_offset: Option<u32>,
    #[arg(long)]
    pub sound: Option<bool>,
}

fn parse_offset(value: &str) -> Result<(Prayer, i32), String> {
    let (name, minutes) = value
        .split_once('=')
        .ok_or_else(|| format!("expected PRAYER=MINUTES, got '{value}'"))?;
    let prayer = name.parse::<Prayer>().map_err(|e| e.to_string())?;
    if !prayer.is_rotation() {
        return Err(format!("{prayer} has no adjustable offset"));
    }
    let minutes = minutes
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad minutes '{minutes}': {e}"))?;
    Ok((prayer, minutes))
}

impl SettingsUpdate {
    /// Applies the requested changes on top of `settings` and validates the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown method or out-of-range values.
    pub fn apply(self, settings: &mut CalculationSettings) -> anyhow::Result<()> {
        if let Some(mode) = self.mode {
            settings.location_mode = mode;
        }
        if let Some(city) = self.city {
            settings.city = city;
        }
        if let Some(country) = self.country {
            settings.country = country;
        }
        if let Some(method) = self.method {
            settings.calculation_method = CalculationMethod::lookup(&method)?.id;
        }
        if let Some(high_precision) = self.high_precision {
            settings.high_precision = high_precision;
        }
        for (prayer, minutes) in self.offsets {
            settings.offsets.insert(prayer, minutes);
        }
        if let Some(notifications) = self.notifications {
            settings.notifications = notifications;
        }
        if let Some(suhoor_offset) = self.suhoor_offset {
            settings.suhoor_offset = suhoor_offset;
        }
        if let Some(sound) = self.sound {
            settings.sound_enabled = sound;
        }
        settings.validate()?;
        Ok(())
    }
}

/// # Errors
///
/// Returns an error if the store cannot be read or written, or the update
/// is invalid.
pub(crate) fn run_settings(ctx: &AppContext, command: SettingsCommands) -> anyhow::Result<()> {
    match command {
        SettingsCommands::Show => {
            println!("{}", render::settings_block(&ctx.settings()?));
            println!("stored at {}", ctx.store.path().display());
        }
        SettingsCommands::Set(update) => {
            let mut settings = ctx.store.load_settings()?;
            update.apply(&mut settings)?;
            if settings.location_mode == LocationMode::Manual && settings.manual_place().is_none() {
                println!("note: manual mode needs both --city and --country; geolocation is used until then");
            }
            ctx.store
                .save_settings(&settings)
                .context("saving settings")?;
            tracing::info!(path = %ctx.store.path().display(), "settings saved");
            println!("{}", render::settings_block(&settings));
        }
        SettingsCommands::Reset => {
            ctx.store
                .save_settings(&CalculationSettings::default())
                .context("resetting settings")?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub(crate) fn run_disclaimer(ctx: &AppContext, dismiss: bool) -> anyhow::Result<()> {
    if dismiss {
        ctx.store.dismiss_disclaimer()?;
        println!("disclaimer dismissed");
    } else if ctx.store.is_disclaimer_dismissed()? {
        println!("disclaimer: dismissed");
    } else {
        println!("disclaimer: shown (dismiss with --dismiss)");
    }
    Ok(())
}
