//! Clients for the external services behind the prayer-time companion, and
//! the refresh pipeline built on top of them.

pub mod aladhan;
pub mod directory;
pub mod error;
mod http;
pub mod ip;
pub mod position;
pub mod refresh;
pub mod resolver;
pub mod schedule;
pub mod signal;
pub mod types;
pub mod weather;

pub use aladhan::PrayerTimesClient;
pub use directory::{Country, DirectoryClient};
pub use error::ClientError;
pub use ip::{IpLocation, IpLocationClient};
pub use position::{DevicePosition, PositionSource};
pub use refresh::{FetchSequencer, FetchTicket, RefreshCycle, Snapshot};
pub use resolver::{LocationResolver, GPS_PLACEHOLDER_NAME};
pub use schedule::ScheduleFetcher;
pub use signal::{spawn_store_watcher, SettingsBus};
pub use weather::WeatherClient;
