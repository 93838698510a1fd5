//! Monthly schedules and date conversion.

use anyhow::Context as _;
use chrono::{Datelike, Local, NaiveDate};
use ramadan_core::{CalendarSystem, Locale};

use crate::context::AppContext;
use crate::render;

/// Prints a month in the requested frame.
///
/// An explicit frame is remembered for later runs. Missing month or year
/// default to the current month in that frame; if the current Hijri month
/// cannot be determined, the current Gregorian month is shown instead.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written, or the month
/// fetch fails.
pub(crate) async fn run_calendar(
    ctx: &AppContext,
    locale: Locale,
    frame: Option<CalendarSystem>,
    month: Option<u32>,
    year: Option<i32>,
) -> anyhow::Result<()> {
    let mut calendar = match frame {
        Some(chosen) => {
            ctx.store.set_calendar_mode(chosen)?;
            chosen
        }
        None => ctx.store.calendar_mode()?,
    };
    let settings = ctx.settings()?;
    let cycle = ctx.refresh_cycle()?;
    let today = Local::now().date_naive();

    let (month, year) = match (calendar, month, year) {
        (_, Some(m), Some(y)) => (m, y),
        (CalendarSystem::Gregorian, m, y) => {
            (m.unwrap_or_else(|| today.month()), y.unwrap_or_else(|| today.year()))
        }
        (CalendarSystem::Hijri, m, y) => match cycle.schedule().hijri_date(today).await {
            Ok(current) => (m.unwrap_or(current.month), y.unwrap_or(current.year)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "cannot detect the Hijri month, showing the Gregorian month"
                );
                calendar = CalendarSystem::Gregorian;
                (today.month(), today.year())
            }
        },
    };

    let (location, schedule) = cycle
        .run_month(&settings, calendar, month, year)
        .await
        .with_context(|| format!("fetching {calendar} month {month}/{year}"))?;

    println!("{}", render::location_line(&location));
    println!("{calendar} {month}/{year}");
    println!();
    println!(
        "{}",
        render::month_table(&schedule, schedule.position_of(today), locale)
    );
    Ok(())
}

/// Prints the Hijri date for `date` (today by default).
///
/// # Errors
///
/// Returns an error if the conversion request fails.
pub(crate) async fn run_hijri(ctx: &AppContext, date: Option<NaiveDate>) -> anyhow::Result<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let cycle = ctx.refresh_cycle()?;
    let hijri = cycle
        .schedule()
        .hijri_date(date)
        .await
        .with_context(|| format!("converting {date}"))?;
    println!("{} = {hijri}", date.format("%d-%m-%Y"));
    if hijri.is_ramadan() {
        println!("Ramadan Mubarak");
    }
    Ok(())
}
