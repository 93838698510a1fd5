//! Prayer-time service response types.
//!
//! Every response is wrapped in a `{"code": 200, "status": "OK", "data": ...}`
//! envelope; [`ApiResponse`] captures that pattern generically.

use chrono::NaiveDate;
use ramadan_core::{Coordinates, DailyTimings, DaySchedule, HijriDate, ScheduleDay};
use serde::{Deserialize, Deserializer};

use crate::error::ClientError;

/// Top-level envelope for all prayer-time API responses.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    #[serde(default)]
    pub status: String,
    pub data: T,
}

/// One day as returned by the `timings*` and `*calendar*` endpoints.
#[derive(Debug, Deserialize)]
pub struct TimingsData {
    pub timings: DailyTimings,
    pub date: DateInfo,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
pub struct DateInfo {
    #[serde(default)]
    pub readable: Option<String>,
    pub gregorian: GregorianInfo,
    pub hijri: HijriInfo,
}

#[derive(Debug, Deserialize)]
pub struct GregorianInfo {
    /// `"dd-mm-yyyy"`.
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct HijriInfo {
    /// `"dd-mm-yyyy"` in the Hijri calendar.
    pub date: String,
    pub day: String,
    pub month: HijriMonth,
    pub year: String,
}

#[derive(Debug, Deserialize)]
pub struct HijriMonth {
    pub number: u32,
    pub en: String,
    #[serde(default)]
    pub ar: String,
}

#[derive(Debug, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub timezone: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub method: Option<MethodInfo>,
}

#[derive(Debug, Deserialize)]
pub struct MethodInfo {
    /// `99` denotes a custom method.
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// `data` of the `gregorianToHijri` endpoint.
#[derive(Debug, Deserialize)]
pub struct ConversionData {
    pub hijri: HijriInfo,
    pub gregorian: GregorianInfo,
}

/// Coordinates in `meta` arrive as numbers or as numeric strings.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrString {
        Num(f64),
        Str(String),
    }

    Ok(match Option::<NumOrString>::deserialize(deserializer)? {
        Some(NumOrString::Num(n)) => Some(n),
        Some(NumOrString::Str(s)) => s.trim().parse().ok(),
        None => None,
    })
}

impl GregorianInfo {
    /// # Errors
    ///
    /// Returns [`ClientError::ApiError`] if the date is not `dd-mm-yyyy`.
    pub fn to_date(&self) -> Result<NaiveDate, ClientError> {
        NaiveDate::parse_from_str(&self.date, "%d-%m-%Y")
            .map_err(|e| ClientError::ApiError(format!("bad gregorian date '{}': {e}", self.date)))
    }
}

impl HijriInfo {
    /// # Errors
    ///
    /// Returns [`ClientError::ApiError`] if the day or year is not numeric.
    pub fn to_domain(&self) -> Result<HijriDate, ClientError> {
        let day = self
            .day
            .trim()
            .parse::<u32>()
            .map_err(|e| ClientError::ApiError(format!("bad hijri day '{}': {e}", self.day)))?;
        let year = self
            .year
            .trim()
            .parse::<i32>()
            .map_err(|e| ClientError::ApiError(format!("bad hijri year '{}': {e}", self.year)))?;
        Ok(HijriDate {
            day,
            month: self.month.number,
            month_en: self.month.en.clone(),
            month_ar: self.month.ar.clone(),
            year,
        })
    }
}

impl Meta {
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

impl TimingsData {
    /// # Errors
    ///
    /// Returns [`ClientError::ApiError`] if either date cannot be read.
    pub fn into_day_schedule(self) -> Result<DaySchedule, ClientError> {
        let gregorian = self.date.gregorian.to_date()?;
        let hijri = self.date.hijri.to_domain()?;
        let (timezone, coordinates, method_id, method_name) = match self.meta {
            Some(meta) => {
                let coordinates = meta.coordinates();
                let (id, name) = meta
                    .method
                    .map_or((None, None), |m| (u8::try_from(m.id).ok(), m.name));
                (meta.timezone, coordinates, id, name)
            }
            None => (String::new(), None, None, None),
        };
        Ok(DaySchedule {
            timings: self.timings,
            gregorian,
            hijri,
            timezone,
            coordinates,
            method_id,
            method_name,
        })
    }

    /// # Errors
    ///
    /// Returns [`ClientError::ApiError`] if either date cannot be read.
    pub fn into_schedule_day(self) -> Result<ScheduleDay, ClientError> {
        Ok(ScheduleDay {
            gregorian: self.date.gregorian.to_date()?,
            hijri: self.date.hijri.to_domain()?,
            timings: self.timings,
        })
    }
}
