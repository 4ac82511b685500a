use crate::clock::Clock;
use crate::rejection::Rejection;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Calendar fields as the form submits them. Month is 1-based.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetTimeFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    #[serde(default)]
    pub second: u32,
    #[serde(default)]
    pub millisecond: u32,
}

/// A validated auction end instant, read as UTC.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "TargetTimeFields", into = "TargetTimeFields")]
pub struct TargetTime {
    instant: DateTime<Utc>,
}

impl TargetTime {
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Result<TargetTime, Rejection> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_milli_opt(hour, minute, second, millisecond))
            .ok_or(Rejection::InvalidEndTime)?;
        Ok(TargetTime {
            instant: Utc.from_utc_datetime(&naive),
        })
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> TargetTime {
        TargetTime { instant }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl TryFrom<TargetTimeFields> for TargetTime {
    type Error = Rejection;

    fn try_from(fields: TargetTimeFields) -> Result<Self, Self::Error> {
        TargetTime::new(
            fields.year,
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second,
            fields.millisecond,
        )
    }
}

impl From<TargetTime> for TargetTimeFields {
    fn from(target: TargetTime) -> Self {
        let instant = target.instant;
        TargetTimeFields {
            year: instant.year(),
            month: instant.month(),
            day: instant.day(),
            hour: instant.hour(),
            minute: instant.minute(),
            second: instant.second(),
            millisecond: instant.timestamp_subsec_millis(),
        }
    }
}

/// Seconds from `clock.now()` until `target`, rounded to the nearest second
/// (halves round up). `None` yields 0 and a past target yields a negative
/// count; callers treat anything `<= 0` as an elapsed deadline.
pub fn get_time_difference_in_sec(target: Option<&TargetTime>, clock: &dyn Clock) -> i64 {
    let target = match target {
        Some(target) => target,
        None => return 0,
    };
    let diff_ms = (target.instant - clock.now()).num_milliseconds();
    (diff_ms + 500).div_euclid(1000)
}
