//! Clock string parsing and formatting.
//!
//! Text is the one place where malformed or signed time can reach the
//! timer, so all validation lives here. Internally time is always a
//! `Duration`, which cannot be negative.

use std::time::Duration;

use crate::error::TimerError;
use crate::view::MAX_TIME;

/// Parse a "MM:SS" clock string.
///
/// Seconds must be 00-59; minutes carry no leading-zero requirement.
/// Signs, fractions, and anything past the display cap are rejected.
pub fn parse_clock(text: &str) -> Result<Duration, TimerError> {
    let (minutes, seconds) = text
        .split_once(':')
        .ok_or_else(|| TimerError::InvalidClock(text.to_string()))?;

    let minutes = parse_field(minutes, text)?;
    let seconds = parse_field(seconds, text)?;
    if seconds > 59 {
        return Err(TimerError::InvalidClock(text.to_string()));
    }

    let total = minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(|| TimerError::InvalidClock(text.to_string()))?;

    let time = Duration::from_secs(total);
    if time > MAX_TIME {
        return Err(TimerError::TimeOutOfRange {
            requested: time,
            max: MAX_TIME,
        });
    }
    Ok(time)
}

/// Format a time as "MM:SS".
pub fn format_clock(time: Duration) -> String {
    let total = time.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn parse_field(field: &str, raw: &str) -> Result<u64, TimerError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimerError::InvalidClock(raw.to_string()));
    }
    field
        .parse()
        .map_err(|_| TimerError::InvalidClock(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_clocks() {
        assert_eq!(parse_clock("00:00").unwrap(), Duration::ZERO);
        assert_eq!(parse_clock("59:59").unwrap(), Duration::from_secs(3599));
        assert_eq!(parse_clock("60:00").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_clock("5:30").unwrap(), Duration::from_secs(330));
    }

    #[test]
    fn test_parse_rejects_over_cap() {
        assert!(matches!(
            parse_clock("60:01"),
            Err(TimerError::TimeOutOfRange { .. })
        ));
        assert!(matches!(
            parse_clock("61:00"),
            Err(TimerError::TimeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_signs() {
        assert!(matches!(
            parse_clock("-5:00"),
            Err(TimerError::InvalidClock(_))
        ));
        assert!(matches!(
            parse_clock("5:-1"),
            Err(TimerError::InvalidClock(_))
        ));
        assert!(matches!(
            parse_clock("+5:00"),
            Err(TimerError::InvalidClock(_))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "5", "abc", "5:5:5", "05:60", "1 : 30", "1.5:00"] {
            assert!(
                matches!(parse_clock(text), Err(TimerError::InvalidClock(_))),
                "{text:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_parse_rejects_huge_numbers() {
        assert!(parse_clock("18446744073709551615:00").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(format_clock(Duration::ZERO), "00:00");
        assert_eq!(format_clock(Duration::from_secs(59)), "00:59");
        assert_eq!(format_clock(Duration::from_secs(3599)), "59:59");
        assert_eq!(format_clock(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn test_round_trip() {
        for text in ["00:00", "07:45", "59:59", "60:00"] {
            assert_eq!(format_clock(parse_clock(text).unwrap()), text);
        }
    }
}
