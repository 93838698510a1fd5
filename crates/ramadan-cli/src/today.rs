//! Handlers that work on today's timetable.

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{Duration, Utc};
use ramadan_core::iftar::in_iftar_window;
use ramadan_core::{next_prayer, IcsEvent, Locale, Prayer};

use crate::context::AppContext;
use crate::render;

/// Runs one refresh cycle and prints the result.
///
/// # Errors
///
/// Returns an error if the settings cannot be read or the schedule fetch
/// fails. Location and weather failures are absorbed by the cycle.
pub(crate) async fn run_today(ctx: &AppContext, locale: Locale) -> anyhow::Result<()> {
    let settings = ctx.settings()?;
    let cycle = ctx.refresh_cycle()?;
    let snapshot = cycle
        .run(&settings)
        .await
        .context("fetching today's prayer times")?;

    let now = snapshot.day.local_now(Utc::now());
    let state = next_prayer(&snapshot.day.timings, now)?;

    println!("{}", render::location_line(&snapshot.location));
    println!("{}", render::day_header(&snapshot.day, locale));
    if let Some(method) = render::method_line(&snapshot.day) {
        println!("{method}");
    }
    println!();
    println!("{}", render::timings_table(&snapshot.day, locale));
    println!();
    println!("{}", render::next_prayer_line(&state, locale));
    if in_iftar_window(&snapshot.day.timings, now)? {
        println!("{}", render::iftar_notice(locale));
    }
    if let Some(weather) = &snapshot.weather {
        println!();
        println!("{}", render::weather_block(weather, locale));
    }

    if !ctx.store.is_disclaimer_dismissed()? {
        println!();
        println!(
            "Times are calculated estimates; check with your local mosque. \
             Run `ramadan disclaimer --dismiss` to hide this notice."
        );
    }
    Ok(())
}

/// Writes an `.ics` file for one of today's prayers.
///
/// # Errors
///
/// Returns an error if the fetch fails, the prayer time does not exist in
/// the location's zone, or the file cannot be written.
pub(crate) async fn run_export(
    ctx: &AppContext,
    prayer: Option<Prayer>,
    duration_mins: u32,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let settings = ctx.settings()?;
    let cycle = ctx.refresh_cycle()?;
    let snapshot = cycle
        .run(&settings)
        .await
        .context("fetching today's prayer times")?;
    let day = &snapshot.day;

    let (prayer, local_start) = match prayer {
        Some(p) => (p, day.gregorian.and_time(day.timings.clock(p)?)),
        None => {
            let next = next_prayer(&day.timings, day.local_now(Utc::now()))?;
            (next.prayer, next.at)
        }
    };
    let start = day
        .to_utc(local_start)
        .with_context(|| format!("{prayer} at {local_start} does not exist in {}", day.timezone))?;

    let event = IcsEvent {
        title: format!("{prayer} - Ramadan Hub"),
        description: format!("{prayer} prayer in {}", snapshot.location.name),
        start,
        end: start + Duration::minutes(i64::from(duration_mins)),
    };

    let path = output
        .unwrap_or_else(|| PathBuf::from(format!("{}.ics", prayer.api_key().to_lowercase())));
    std::fs::write(&path, event.to_ics())
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), %prayer, "calendar event written");
    println!("wrote {}", path.display());
    Ok(())
}
