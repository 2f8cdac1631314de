//! Relative time-filter tokens (`r<seconds>`) used by the `f_TPR` parameter.

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_WEEK: u64 = 604_800;
pub const SECONDS_PER_MONTH: u64 = 2_592_000;

/// Display label for the empty token
pub const ANY_TIME: &str = "Any time";
/// Display label for tokens outside the preset table
pub const CUSTOM: &str = "Custom";

/// A named quick-filter preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePreset {
    pub label: &'static str,
    pub token: &'static str,
    pub hours: f64,
}

pub const QUICK_TIME_FILTERS: &[TimePreset] = &[
    TimePreset { label: "30 minutes", token: "r1800", hours: 0.5 },
    TimePreset { label: "1 hour", token: "r3600", hours: 1.0 },
    TimePreset { label: "2 hours", token: "r7200", hours: 2.0 },
    TimePreset { label: "4 hours", token: "r14400", hours: 4.0 },
    TimePreset { label: "8 hours", token: "r28800", hours: 8.0 },
    TimePreset { label: "24 hours", token: "r86400", hours: 24.0 },
    TimePreset { label: "3 days", token: "r259200", hours: 72.0 },
    TimePreset { label: "1 week", token: "r604800", hours: 168.0 },
    TimePreset { label: "1 month", token: "r2592000", hours: 720.0 },
];

/// Whole seconds in `hours`, rounded down. Negative input yields 0.
pub fn hours_to_seconds(hours: f64) -> u64 {
    (hours * SECONDS_PER_HOUR as f64).floor().max(0.0) as u64
}

pub fn seconds_to_hours(seconds: u64) -> f64 {
    seconds as f64 / SECONDS_PER_HOUR as f64
}

/// Encode an hour count as an `f_TPR` token
pub fn time_filter_token(hours: f64) -> String {
    format!("r{}", hours_to_seconds(hours))
}

/// Decode an `r<seconds>` token into hours
pub fn parse_time_filter(token: &str) -> Option<f64> {
    let digits = token.strip_prefix('r')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok().map(seconds_to_hours)
}

/// Human label for a token: a preset name, "Any time" or "Custom"
pub fn time_filter_display(token: &str) -> &'static str {
    if token.is_empty() {
        return ANY_TIME;
    }
    QUICK_TIME_FILTERS
        .iter()
        .find(|preset| preset.token == token)
        .map(|preset| preset.label)
        .unwrap_or(CUSTOM)
}
