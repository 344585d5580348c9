//! Common types used across the platform

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Supported languages for reports and customer emails
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "ru")]
    Russian,
    #[serde(alias = "en")]
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::English => "en",
        }
    }
}

/// Inclusive time window used for production reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// The calendar week before the one containing `now`.
    ///
    /// `start` is that week's Monday at 00:00:00, `end` is its Sunday at
    /// 23:59:59.999999.
    pub fn previous_week(now: NaiveDateTime) -> Self {
        let today = now.date();
        let weekday = i64::from(now.weekday().num_days_from_monday());

        let monday = today - Duration::days(weekday + 7);
        let this_monday = today - Duration::days(weekday);

        Self {
            start: monday.and_time(NaiveTime::MIN),
            end: this_monday.and_time(NaiveTime::MIN) - Duration::microseconds(1),
        }
    }

    /// Inclusive on both ends
    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        self.start <= moment && moment <= self.end
    }
}
