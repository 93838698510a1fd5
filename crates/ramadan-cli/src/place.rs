//! Location, weather and directory lookups.

use anyhow::Context as _;
use ramadan_core::Locale;

use crate::context::AppContext;
use crate::render;

/// # Errors
///
/// Returns an error if the settings cannot be read.
pub(crate) async fn run_locate(ctx: &AppContext) -> anyhow::Result<()> {
    let settings = ctx.settings()?;
    let location = ctx.refresh_cycle()?.resolve(&settings).await;
    println!("{}", render::location_line(&location));
    Ok(())
}

/// # Errors
///
/// Returns an error if the location has no coordinates or the forecast is
/// unavailable.
pub(crate) async fn run_weather(ctx: &AppContext, locale: Locale) -> anyhow::Result<()> {
    let settings = ctx.settings()?;
    let cycle = ctx.refresh_cycle()?;
    let location = cycle.resolve(&settings).await;

    // Manual places only learn their coordinates from the day schedule.
    let (location, report) = match location.coordinates {
        Some(coordinates) => {
            let report = cycle.weather(coordinates).await;
            (location, report)
        }
        None => {
            let snapshot = cycle
                .run(&settings)
                .await
                .context("looking up coordinates for the manual location")?;
            (snapshot.location, snapshot.weather)
        }
    };
    let report = report.context("weather is unavailable right now")?;

    println!("{}", render::location_line(&location));
    println!("{}", render::weather_block(&report, locale));
    Ok(())
}

/// # Errors
///
/// Returns an error if the directory request fails.
pub(crate) async fn run_countries(ctx: &AppContext) -> anyhow::Result<()> {
    let countries = ctx
        .directory()?
        .countries()
        .await
        .context("listing countries")?;
    println!("{:<6}{:<6}NAME", "ISO2", "ISO3");
    for country in &countries {
        println!("{:<6}{:<6}{}", country.iso2, country.iso3, country.name);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the directory request fails.
pub(crate) async fn run_cities(ctx: &AppContext, country: &str) -> anyhow::Result<()> {
    let cities = ctx
        .directory()?
        .cities(country)
        .await
        .with_context(|| format!("listing cities of {country}"))?;
    if cities.is_empty() {
        println!("no cities found for {country}");
        return Ok(());
    }
    for city in &cities {
        println!("{city}");
    }
    Ok(())
}
