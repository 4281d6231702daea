//! # Time Formatting
//!
//! Durations and paces are shown as `H:MM:SS` when an hour or longer and
//! `M:SS` otherwise. Minutes and seconds are zero-padded to two digits
//! except for the leading field.
//!
//! ```rust
//! use pace_core::time_format::{format_duration, format_pace};
//!
//! assert_eq!(format_duration(1500.0), "25:00");
//! assert_eq!(format_duration(11098.4), "3:04:58");
//! assert_eq!(format_pace(299.6), "5:00");
//! ```

/// Format a duration in seconds, omitting the hour field under one hour.
///
/// The value is rounded to whole seconds before being split so that
/// 59.6 s becomes `1:00` rather than `0:60`.
pub fn format_duration(total_seconds: f64) -> String {
    let whole = round_seconds(total_seconds);
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let seconds = whole % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Format a pace (seconds per distance unit) as `M:SS`.
///
/// Paces never grow an hour field; a 75-minute mile reads `75:00`.
pub fn format_pace(seconds_per_unit: f64) -> String {
    let whole = round_seconds(seconds_per_unit);
    format!("{}:{:02}", whole / 60, whole % 60)
}

fn round_seconds(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_one_hour_omits_hours() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(59.0), "0:59");
        assert_eq!(format_duration(300.0), "5:00");
        assert_eq!(format_duration(3000.0), "50:00");
        assert_eq!(format_duration(3599.0), "59:59");
    }

    #[test]
    fn test_hours_are_padded() {
        assert_eq!(format_duration(3600.0), "1:00:00");
        assert_eq!(format_duration(3605.0), "1:00:05");
        assert_eq!(format_duration(12_660.0), "3:31:00");
    }

    #[test]
    fn test_rounding_carries_into_next_field() {
        assert_eq!(format_duration(59.6), "1:00");
        assert_eq!(format_duration(3599.5), "1:00:00");
        assert_eq!(format_pace(359.7), "6:00");
    }

    #[test]
    fn test_pace_has_no_hour_field() {
        assert_eq!(format_pace(300.0), "5:00");
        assert_eq!(format_pace(482.802), "8:03");
        assert_eq!(format_pace(4500.0), "75:00");
    }

    #[test]
    fn test_non_finite_formats_as_zero() {
        assert_eq!(format_duration(f64::NAN), "0:00");
        assert_eq!(format_pace(-3.0), "0:00");
    }
}
