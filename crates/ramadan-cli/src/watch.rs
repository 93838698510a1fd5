//! Live countdown loop.
//!
//! One `select!` loop drives everything: a one-second tick for the countdown,
//! Iftar window and reminders, a one-minute tick for the theme bucket,
//! settings changes from the bus, refresh results, and Ctrl-C. Refreshes run
//! in spawned tasks; only the most recently started one is applied.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike, Utc};
use ramadan_client::{
    spawn_store_watcher, ClientError, DevicePosition, FetchSequencer, FetchTicket, RefreshCycle,
    SettingsBus, Snapshot,
};
use ramadan_core::localize::{format_12h, prayer_name};
use ramadan_core::{
    due_reminders, next_prayer, CalculationSettings, DaySchedule, IftarTransition, IftarWatch,
    Locale, Palette, Reminder, ReminderKind, TimeOfDay,
};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::context::AppContext;
use crate::render;

type RefreshResult = (FetchTicket, Result<Snapshot, ClientError>);

/// Spawns refresh cycles and stamps each with a ticket.
struct Refresher {
    cycle: Arc<RefreshCycle<DevicePosition>>,
    sequencer: FetchSequencer,
    tx: mpsc::Sender<RefreshResult>,
}

impl Refresher {
    fn start(&self, settings: CalculationSettings) {
        let ticket = self.sequencer.begin();
        let cycle = Arc::clone(&self.cycle);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = cycle.run(&settings).await;
            if tx.send((ticket, result)).await.is_err() {
                tracing::debug!("watch loop exited before refresh completed");
            }
        });
    }
}

/// What one second of the loop produced.
#[derive(Debug, Default)]
pub(crate) struct Tick {
    pub countdown: Option<String>,
    pub events: Vec<String>,
    /// The location's date has moved past the loaded schedule.
    pub refresh: bool,
}

/// State carried between ticks.
pub(crate) struct LiveView {
    snapshot: Option<Snapshot>,
    settings: CalculationSettings,
    locale: Locale,
    iftar: IftarWatch,
    last_tick: Option<NaiveDateTime>,
    time_of_day: Option<TimeOfDay>,
    refresh_requested_for: Option<NaiveDate>,
}

impl LiveView {
    pub(crate) fn new(settings: CalculationSettings, locale: Locale) -> Self {
        Self {
            snapshot: None,
            settings,
            locale,
            iftar: IftarWatch::new(),
            last_tick: None,
            time_of_day: None,
            refresh_requested_for: None,
        }
    }

    pub(crate) fn settings(&self) -> &CalculationSettings {
        &self.settings
    }

    pub(crate) fn set_settings(&mut self, settings: CalculationSettings) {
        self.settings = settings;
    }

    /// Installs a fresh snapshot and returns the header to print.
    pub(crate) fn apply(&mut self, snapshot: Snapshot) -> Vec<String> {
        let mut lines = vec![
            render::location_line(&snapshot.location),
            render::day_header(&snapshot.day, self.locale),
        ];
        if let Some(weather) = &snapshot.weather {
            if let Some(first) = render::weather_block(weather, self.locale).lines().next() {
                lines.push(first.to_string());
            }
        }
        // The zone may have changed with the location.
        self.last_tick = None;
        self.snapshot = Some(snapshot);
        lines
    }

    pub(crate) fn tick(&mut self, now: DateTime<Utc>) -> Tick {
        let mut tick = Tick::default();
        let Some(snapshot) = &self.snapshot else {
            return tick;
        };
        let day = &snapshot.day;
        let local = day.local_now(now);

        if local.date() > day.gregorian && self.refresh_requested_for != Some(local.date()) {
            self.refresh_requested_for = Some(local.date());
            tick.refresh = true;
        }

        match next_prayer(&day.timings, local) {
            Ok(state) => tick.countdown = Some(render::next_prayer_line(&state, self.locale)),
            Err(e) => tracing::warn!(error = %e, "cannot compute next prayer"),
        }

        match self.iftar.observe(&day.timings, local) {
            Ok(Some(IftarTransition::Started)) => {
                tracing::info!("iftar window started");
                tick.events.push(render::iftar_notice(self.locale).to_string());
            }
            Ok(Some(IftarTransition::Ended)) => tracing::info!("iftar window ended"),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "cannot evaluate iftar window"),
        }

        if let Some(since) = self.last_tick {
            match due_reminders(&day.timings, &self.settings, since, local) {
                Ok(due) => {
                    for reminder in due {
                        tracing::info!(
                            kind = ?reminder.kind,
                            at = %reminder.fire_at,
                            "reminder due"
                        );
                        tick.events.push(reminder_line(&reminder, day, self.locale));
                    }
                }
                Err(e) => tracing::warn!(error = %e, "cannot compute reminders"),
            }
        }
        self.last_tick = Some(local);
        tick
    }

    /// Returns a line when the time-of-day bucket changes.
    pub(crate) fn theme(&mut self, now: DateTime<Utc>) -> Option<String> {
        let (local, next, weather) = match &self.snapshot {
            Some(s) => (
                s.day.local_now(now),
                next_prayer(&s.day.timings, s.day.local_now(now))
                    .ok()
                    .map(|n| n.prayer),
                s.weather.as_ref().map(|w| w.current.weather_code),
            ),
            None => (now.with_timezone(&Local).naive_local(), None, None),
        };
        let bucket = TimeOfDay::from_hour(local.hour());
        if self.time_of_day == Some(bucket) {
            return None;
        }
        self.time_of_day = Some(bucket);
        let palette = next.map(|p| Palette::for_prayer(p, weather));
        Some(match palette {
            Some(p) => format!("theme: {bucket} {}", p.main),
            None => format!("theme: {bucket}"),
        })
    }
}

fn reminder_line(reminder: &Reminder, day: &DaySchedule, locale: Locale) -> String {
    let name = prayer_name(reminder.prayer, locale);
    let at = format_12h(day.timings.get(reminder.prayer), locale);
    match (reminder.kind, locale) {
        (ReminderKind::Suhoor, Locale::En) => format!("Suhoor reminder: {name} at {at}"),
        (ReminderKind::Suhoor, Locale::Ar) => format!("تذكير السحور: {name} {at}"),
        (ReminderKind::Iftar, Locale::En) => format!("Iftar: {name} at {at}"),
        (ReminderKind::Iftar, Locale::Ar) => format!("الإفطار: {name} {at}"),
    }
}

/// Runs until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the clients cannot be built or the settings cannot be
/// read at start-up. Failures inside the loop are logged.
pub(crate) async fn run_watch(ctx: &AppContext, locale: Locale) -> anyhow::Result<()> {
    let bus = Arc::new(SettingsBus::new(ctx.settings()?));
    let watcher = spawn_store_watcher(
        ctx.store.clone(),
        Arc::clone(&bus),
        Duration::from_secs(ctx.config.settings_poll_secs),
    );
    let mut settings_rx = bus.subscribe();

    let (tx, mut results) = mpsc::channel::<RefreshResult>(8);
    let refresher = Refresher {
        cycle: Arc::new(ctx.refresh_cycle()?),
        sequencer: FetchSequencer::new(),
        tx,
    };
    let mut view = LiveView::new(bus.current(), locale);
    refresher.start(bus.current());

    let mut second = time::interval(Duration::from_secs(1));
    second.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut minute = time::interval(Duration::from_secs(60));
    minute.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut stdout = std::io::stdout();
    loop {
        tokio::select! {
            _ = second.tick() => {
                let tick = view.tick(Utc::now());
                for event in &tick.events {
                    println!("\n{event}");
                }
                if let Some(line) = &tick.countdown {
                    print!("\r{line}   ");
                    if let Err(e) = stdout.flush() {
                        tracing::debug!(error = %e, "stdout flush failed");
                    }
                }
                if tick.refresh {
                    tracing::info!("date changed, refreshing");
                    refresher.start(view.settings().clone());
                }
            }
            _ = minute.tick() => {
                if let Some(line) = view.theme(Utc::now()) {
                    tracing::info!("{line}");
                }
            }
            changed = settings_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let settings = settings_rx.borrow_and_update().clone();
                view.set_settings(settings.clone());
                println!("\nsettings changed, refreshing");
                refresher.start(settings);
            }
            Some((ticket, result)) = results.recv() => {
                if refresher.sequencer.is_current(ticket) {
                    match result {
                        Ok(snapshot) => {
                            println!();
                            for line in view.apply(snapshot) {
                                println!("{line}");
                            }
                        }
                        Err(e) => tracing::warn!(error = %e, "refresh failed"),
                    }
                } else {
                    tracing::debug!(?ticket, "discarding stale refresh result");
                }
            }
            _ = &mut ctrl_c => {
                println!();
                break;
            }
        }
    }

    watcher.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use ramadan_core::{Coordinates, DailyTimings, HijriDate, LocationSource, ResolvedLocation};

    use super::*;

    fn snapshot() -> Snapshot {
        let coords = Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        };
        Snapshot {
            location: ResolvedLocation::at(coords, "Null Island".to_string(), LocationSource::Ip),
            day: DaySchedule {
                timings: DailyTimings {
                    imsak: "04:20".to_string(),
                    fajr: "04:30".to_string(),
                    sunrise: "05:55".to_string(),
                    dhuhr: "12:15".to_string(),
                    asr: "15:45".to_string(),
                    maghrib: "18:20".to_string(),
                    isha: "19:50".to_string(),
                    midnight: "23:40".to_string(),
                },
                gregorian: NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
                hijri: HijriDate {
                    day: 3,
                    month: 9,
                    month_en: "Ramaḍān".to_string(),
                    month_ar: "رَمَضان".to_string(),
                    year: 1447,
                },
                timezone: "UTC".to_string(),
                coordinates: Some(coords),
                method_id: Some(5),
                method_name: None,
            },
            weather: None,
        }
    }

    fn utc(day: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, day, h, m, s).unwrap()
    }

    #[test]
    fn no_snapshot_means_no_output() {
        let mut view = LiveView::new(CalculationSettings::default(), Locale::En);
        let tick = view.tick(utc(20, 12, 0, 0));
        assert!(tick.countdown.is_none());
        assert!(!tick.refresh);
    }

    #[test]
    fn countdown_targets_next_prayer() {
        let mut view = LiveView::new(CalculationSettings::default(), Locale::En);
        view.apply(snapshot());
        let tick = view.tick(utc(20, 17, 20, 0));
        let line = tick.countdown.unwrap();
        assert!(line.starts_with("Next: Maghrib at 6:20 PM, in 01:00:00"), "{line}");
    }

    #[test]
    fn iftar_and_reminder_fire_once_when_maghrib_is_crossed() {
        let mut view = LiveView::new(CalculationSettings::default(), Locale::En);
        view.apply(snapshot());

        assert!(view.tick(utc(20, 18, 19, 59)).events.is_empty());
        let at_maghrib = view.tick(utc(20, 18, 20, 0));
        assert_eq!(at_maghrib.events.len(), 2, "{:?}", at_maghrib.events);
        assert!(at_maghrib.events.iter().any(|e| e.starts_with("Iftar time")));
        assert!(at_maghrib.events.iter().any(|e| e.starts_with("Iftar: Maghrib")));
        assert!(view.tick(utc(20, 18, 20, 1)).events.is_empty());
    }

    #[test]
    fn arabic_locale_localizes_the_iftar_notice() {
        let mut view = LiveView::new(CalculationSettings::default(), Locale::Ar);
        view.apply(snapshot());
        view.tick(utc(20, 18, 19, 59));
        let tick = view.tick(utc(20, 18, 20, 0));
        assert!(tick.events.iter().any(|e| e == render::iftar_notice(Locale::Ar)));
        assert!(!tick.events.iter().any(|e| e.starts_with("Iftar time")));
    }

    #[test]
    fn suhoor_reminder_respects_notifications_flag() {
        let mut view = LiveView::new(CalculationSettings::default(), Locale::En);
        view.apply(snapshot());
        view.tick(utc(20, 3, 59, 59));
        let tick = view.tick(utc(20, 4, 0, 0));
        assert_eq!(tick.events, vec!["Suhoor reminder: Fajr at 4:30 AM".to_string()]);

        let mut quiet = LiveView::new(
            CalculationSettings {
                notifications: false,
                ..CalculationSettings::default()
            },
            Locale::En,
        );
        quiet.apply(snapshot());
        quiet.tick(utc(20, 3, 59, 59));
        assert!(quiet.tick(utc(20, 4, 0, 0)).events.is_empty());
    }

    #[test]
    fn date_change_requests_one_refresh() {
        let mut view = LiveView::new(CalculationSettings::default(), Locale::En);
        view.apply(snapshot());
        assert!(!view.tick(utc(20, 23, 59, 59)).refresh);
        assert!(view.tick(utc(21, 0, 0, 0)).refresh);
        assert!(!view.tick(utc(21, 0, 0, 1)).refresh);
    }

    #[test]
    fn theme_reports_only_bucket_changes() {
        let mut view = LiveView::new(CalculationSettings::default(), Locale::En);
        view.apply(snapshot());
        let first = view.theme(utc(20, 17, 0, 0)).unwrap();
        assert!(first.starts_with("theme: dusk"), "{first}");
        assert!(view.theme(utc(20, 18, 0, 0)).is_none());
        assert!(view.theme(utc(20, 20, 0, 0)).unwrap().starts_with("theme: night"));
    }
}
