use chrono::{DateTime, TimeZone, Timelike};

/// Hour of day with minutes as a fraction, in the timestamp's own offset.
pub fn hour_frac<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> f64 {
    timestamp.hour() as f64 + timestamp.minute() as f64 / 60.0
}

/// Converts a field the way a loosely typed `Number(..)` would: blank is zero,
/// anything non-numeric is `NaN`.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Rust accepts "inf" and "nan" spellings that should not count as numbers.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Percentage with one decimal and trailing zeros trimmed: 0.5 -> "50%", 1/3 -> "33.3%".
pub fn format_percent(proportion: f64) -> String {
    if proportion.is_nan() {
        return "NaN%".to_string();
    }
    let formatted = format!("{:.1}", proportion * 100.0);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}

/// Renders an optional figure, with "unknown" standing in for missing values.
pub fn display_figure(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "unknown".to_string(),
    }
}
