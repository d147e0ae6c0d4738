//! # Temporal Extractor (C2)
//!
//! Regex-driven extraction of dates, durations, relative, and recurring
//! expressions, normalized to ISO 8601 or RFC 5545.

use chrono::{DateTime, Datelike, Duration as ChronoDuration, Utc, Weekday};
use regex::Regex;
use std::sync::LazyLock;

/// The kind of temporal expression a [`TemporalMatch`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalType {
    /// An absolute calendar date.
    Date,
    /// A span of time (ISO 8601 duration).
    Duration,
    /// A relative expression resolved against the extraction-time clock.
    Relative,
    /// A recurring expression (RFC 5545 `RRULE`).
    Recurring,
}

/// One temporal expression found in content.
#[derive(Debug, Clone)]
pub struct TemporalMatch {
    /// Start byte offset in the source content.
    pub start: usize,
    /// End byte offset (exclusive) in the source content.
    pub end: usize,
    /// The raw matched text.
    pub text: String,
    /// The kind of expression.
    pub temporal_type: TemporalType,
    /// `YYYY-MM-DD`, ISO 8601 duration, or `RRULE:...`.
    pub normalized_value: String,
}

struct Pattern {
    regex: &'static LazyLock<Regex>,
    temporal_type: TemporalType,
    // Higher runs first; overlapping lower-priority matches are dropped.
    priority: u8,
}

static ABS_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{4})-(\d{2})-(\d{2})\b").expect("valid regex"));

static DURATION_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s*(day|week|month|year|hour|minute)s?\s*(?:to|-)\s*(\d+)\s*(day|week|month|year|hour|minute)s?\b")
        .expect("valid regex")
});

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s*(day|week|month|year|hour|minute)s?\b").expect("valid regex")
});

static RELATIVE_DAYS_AGO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+)\s*days?\s*ago\b").expect("valid regex"));

static RELATIVE_IN_DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bin\s*(\d+)\s*(day|week)s?\b").expect("valid regex"));

static RELATIVE_NEXT_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bnext\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .expect("valid regex")
});

static RELATIVE_TODAY_TOMORROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(today|tomorrow|yesterday)\b").expect("valid regex"));

static RECURRING_EVERY_N_DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bevery\s+(\d+)\s+days?\b").expect("valid regex"));

static RECURRING_EVERY_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bevery\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .expect("valid regex")
});

static RECURRING_WEEKLY_DAILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(daily|weekly|monthly|yearly)\b").expect("valid regex"));

fn weekday_abbrev(name: &str) -> &'static str {
    match name.to_lowercase().as_str() {
        "monday" => "MO",
        "tuesday" => "TU",
        "wednesday" => "WE",
        "thursday" => "TH",
        "friday" => "FR",
        "saturday" => "SA",
        "sunday" => "SU",
        _ => "MO",
    }
}

fn weekday_from_name(name: &str) -> Weekday {
    match name.to_lowercase().as_str() {
        "monday" => Weekday::Mon,
        "tuesday" => Weekday::Tue,
        "wednesday" => Weekday::Wed,
        "thursday" => Weekday::Thu,
        "friday" => Weekday::Fri,
        "saturday" => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

fn duration_unit_code(unit: &str) -> (&'static str, bool) {
    // Returns (code, is_time_unit). Time units go under `PT`.
    match unit.to_lowercase().as_str() {
        "hour" => ("H", true),
        "minute" => ("M", true),
        "day" => ("D", false),
        "week" => ("W", false),
        "month" => ("M", false),
        "year" => ("Y", false),
        _ => ("D", false),
    }
}

fn iso_duration(amount: &str, unit: &str) -> String {
    let (code, is_time) = duration_unit_code(unit);
    if is_time {
        format!("PT{amount}{code}")
    } else {
        format!("P{amount}{code}")
    }
}

/// A prioritized regex-driven temporal extractor.
///
/// Higher-priority patterns are scanned first; a later, lower-priority
/// pattern is skipped if it overlaps a span already claimed.
pub struct TemporalExtractor {
    now: DateTime<Utc>,
}

impl Default for TemporalExtractor {
    fn default() -> Self {
        Self { now: Utc::now() }
    }
}

impl TemporalExtractor {
    /// Create an extractor anchored to the current wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor anchored to a fixed instant (for deterministic tests).
    #[must_use]
    pub fn with_now(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Extract and normalize every temporal expression in `content`.
    ///
    /// Output is sorted by start position and deduplicated; overlapping
    /// lower-priority matches are dropped (§4.4 overlap rule).
    #[must_use]
    pub fn extract(&self, content: &str) -> Vec<TemporalMatch> {
        let mut claimed: Vec<(usize, usize)> = Vec::new();
        let mut out = Vec::new();

        for pattern in Self::patterns_by_priority() {
            for m in pattern.regex.find_iter(content) {
                let (start, end) = (m.start(), m.end());
                if claimed.iter().any(|&(s, e)| start < e && end > s) {
                    continue;
                }
                if let Some(normalized) = self.normalize(pattern.temporal_type, m.as_str()) {
                    claimed.push((start, end));
                    out.push(TemporalMatch {
                        start,
                        end,
                        text: m.as_str().to_string(),
                        temporal_type: pattern.temporal_type,
                        normalized_value: normalized,
                    });
                }
            }
        }

        out.sort_by_key(|m| m.start);
        out
    }

    fn patterns_by_priority() -> Vec<Pattern> {
        let mut patterns = vec![
            Pattern { regex: &ABS_DATE, temporal_type: TemporalType::Date, priority: 100 },
            Pattern { regex: &RECURRING_EVERY_N_DAYS, temporal_type: TemporalType::Recurring, priority: 90 },
            Pattern { regex: &RECURRING_EVERY_WEEKDAY, temporal_type: TemporalType::Recurring, priority: 90 },
            Pattern { regex: &RECURRING_WEEKLY_DAILY, temporal_type: TemporalType::Recurring, priority: 85 },
            Pattern { regex: &RELATIVE_DAYS_AGO, temporal_type: TemporalType::Relative, priority: 80 },
            Pattern { regex: &RELATIVE_IN_DAYS, temporal_type: TemporalType::Relative, priority: 80 },
            Pattern { regex: &RELATIVE_NEXT_WEEKDAY, temporal_type: TemporalType::Relative, priority: 75 },
            Pattern { regex: &RELATIVE_TODAY_TOMORROW, temporal_type: TemporalType::Relative, priority: 70 },
            Pattern { regex: &DURATION_RANGE, temporal_type: TemporalType::Duration, priority: 65 },
            Pattern { regex: &DURATION, temporal_type: TemporalType::Duration, priority: 60 },
        ];
        patterns.sort_by(|a, b| b.priority.cmp(&a.priority));
        patterns
    }

    fn normalize(&self, temporal_type: TemporalType, text: &str) -> Option<String> {
        match temporal_type {
            TemporalType::Date => {
                let caps = ABS_DATE.captures(text)?;
                Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
            }
            TemporalType::Duration => self.normalize_duration(text),
            TemporalType::Relative => self.normalize_relative(text),
            TemporalType::Recurring => self.normalize_recurring(text),
        }
    }

    fn normalize_duration(&self, text: &str) -> Option<String> {
        if let Some(caps) = DURATION_RANGE.captures(text) {
            let from = iso_duration(&caps[1], &caps[2]);
            let to = iso_duration(&caps[3], &caps[4]);
            return Some(format!("{from}/{to}"));
        }
        let caps = DURATION.captures(text)?;
        Some(iso_duration(&caps[1], &caps[2]))
    }

    fn normalize_relative(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        if let Some(caps) = RELATIVE_DAYS_AGO.captures(text) {
            let days: i64 = caps[1].parse().ok()?;
            return Some((self.now - ChronoDuration::days(days)).format("%Y-%m-%d").to_string());
        }
        if let Some(caps) = RELATIVE_IN_DAYS.captures(text) {
            let amount: i64 = caps[1].parse().ok()?;
            let unit = &caps[2];
            let delta = if unit.eq_ignore_ascii_case("week") {
                ChronoDuration::weeks(amount)
            } else {
                ChronoDuration::days(amount)
            };
            return Some((self.now + delta).format("%Y-%m-%d").to_string());
        }
        if let Some(caps) = RELATIVE_NEXT_WEEKDAY.captures(text) {
            let target = weekday_from_name(&caps[1]);
            let mut delta = (target.num_days_from_monday() as i64
                - self.now.weekday().num_days_from_monday() as i64
                + 7)
                % 7;
            if delta == 0 {
                delta = 7;
            }
            return Some((self.now + ChronoDuration::days(delta)).format("%Y-%m-%d").to_string());
        }
        match lower.as_str() {
            "today" => Some(self.now.format("%Y-%m-%d").to_string()),
            "tomorrow" => Some((self.now + ChronoDuration::days(1)).format("%Y-%m-%d").to_string()),
            "yesterday" => Some((self.now - ChronoDuration::days(1)).format("%Y-%m-%d").to_string()),
            _ => None,
        }
    }

    fn normalize_recurring(&self, text: &str) -> Option<String> {
        if let Some(caps) = RECURRING_EVERY_N_DAYS.captures(text) {
            return Some(format!("RRULE:FREQ=DAILY;INTERVAL={}", &caps[1]));
        }
        if let Some(caps) = RECURRING_EVERY_WEEKDAY.captures(text) {
            return Some(format!("RRULE:FREQ=WEEKLY;BYDAY={}", weekday_abbrev(&caps[1])));
        }
        if let Some(caps) = RECURRING_WEEKLY_DAILY.captures(text) {
            let freq = match caps[1].to_lowercase().as_str() {
                "daily" => "DAILY",
                "weekly" => "WEEKLY",
                "monthly" => "MONTHLY",
                "yearly" => "YEARLY",
                _ => "DAILY",
            };
            return Some(format!("RRULE:FREQ={freq}"));
        }
        None
    }
}
