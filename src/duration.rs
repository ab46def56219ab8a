//! Text codec for duration fields.
//!
//! Durations are written as ISO-8601 day-time durations (`P1DT2H30M`,
//! `PT0.5S`). On input the codec also accepts the `TimeSpan` constant format
//! used by .NET serializers (`1.02:30:00`, `00:00:20.5`), since services
//! built on that stack return it for the same properties.
//!
//! Year and month components are rejected: their length depends on a
//! calendar anchor the record does not have.

use std::fmt::Write;
use std::time::Duration;
use thiserror::Error;

const NANOS_PER_SEC: u128 = 1_000_000_000;
const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
const SECS_PER_WEEK: u64 = 7 * SECS_PER_DAY;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("empty duration")]
    Empty,

    #[error("negative durations are not supported")]
    Negative,

    #[error("calendar component `{0}` has no fixed length")]
    CalendarComponent(char),

    #[error("invalid duration syntax: {0}")]
    Syntax(String),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u64 },

    #[error("duration overflows")]
    Overflow,
}

/// Parses an ISO-8601 duration or a .NET `TimeSpan` string.
///
/// Surrounding whitespace is not part of either format and is rejected.
pub fn parse(s: &str) -> Result<Duration, DurationParseError> {
    if s.is_empty() {
        return Err(DurationParseError::Empty);
    }
    if s.starts_with('-') {
        return Err(DurationParseError::Negative);
    }
    match s.strip_prefix('P') {
        Some(rest) => parse_iso(rest),
        None => parse_timespan(s),
    }
}

/// Formats a duration as a canonical ISO-8601 string.
pub fn format(duration: Duration) -> String {
    let total = duration.as_secs();
    let nanos = duration.subsec_nanos();
    if total == 0 && nanos == 0 {
        return "PT0S".to_string();
    }

    let days = total / SECS_PER_DAY;
    let hours = total % SECS_PER_DAY / SECS_PER_HOUR;
    let minutes = total % SECS_PER_HOUR / SECS_PER_MINUTE;
    let seconds = total % SECS_PER_MINUTE;

    // Writing into a String cannot fail.
    let mut out = String::from("P");
    if days > 0 {
        let _ = write!(out, "{}D", days);
    }
    if hours > 0 || minutes > 0 || seconds > 0 || nanos > 0 {
        out.push('T');
        if hours > 0 {
            let _ = write!(out, "{}H", hours);
        }
        if minutes > 0 {
            let _ = write!(out, "{}M", minutes);
        }
        if seconds > 0 || nanos > 0 {
            let _ = write!(out, "{}", seconds);
            if nanos > 0 {
                let fraction = format!("{:09}", nanos);
                out.push('.');
                out.push_str(fraction.trim_end_matches('0'));
            }
            out.push('S');
        }
    }
    out
}

/// One `<number><designator>` pair of an ISO duration.
struct Component<'a> {
    whole: &'a str,
    fraction: &'a str,
    designator: char,
}

fn parse_iso(rest: &str) -> Result<Duration, DurationParseError> {
    let (date, time) = match rest.find('T') {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };
    if time == Some("") {
        return Err(DurationParseError::Syntax(
            "`T` must be followed by a time component".to_string(),
        ));
    }

    let date = components(date)?;
    let time = match time {
        Some(t) => components(t)?,
        None => Vec::new(),
    };
    if date.is_empty() && time.is_empty() {
        return Err(DurationParseError::Syntax("no components".to_string()));
    }

    let count = date.len() + time.len();
    let mut total: u128 = 0;
    let mut previous_rank = None;
    for (index, (component, unit)) in date
        .iter()
        .map(|c| (c, date_unit(c.designator)))
        .chain(time.iter().map(|c| (c, time_unit(c.designator))))
        .enumerate()
    {
        let unit = unit?;
        // Designators must appear once each, largest first.
        if previous_rank.map_or(false, |rank| unit.0 <= rank) {
            return Err(DurationParseError::Syntax(format!(
                "designator `{}` out of order",
                component.designator
            )));
        }
        previous_rank = Some(unit.0);
        if !component.fraction.is_empty() && index + 1 != count {
            return Err(DurationParseError::Syntax(
                "only the last component may have a fraction".to_string(),
            ));
        }
        let nanos = component_nanos(component, unit)?;
        total = total
            .checked_add(nanos)
            .ok_or(DurationParseError::Overflow)?;
    }
    from_nanos(total)
}

fn date_unit(designator: char) -> Result<(usize, u64), DurationParseError> {
    match designator {
        'Y' | 'M' => Err(DurationParseError::CalendarComponent(designator)),
        'W' => Ok((0, SECS_PER_WEEK)),
        'D' => Ok((1, SECS_PER_DAY)),
        other => Err(DurationParseError::Syntax(format!(
            "unexpected designator `{}`",
            other
        ))),
    }
}

fn time_unit(designator: char) -> Result<(usize, u64), DurationParseError> {
    match designator {
        'H' => Ok((2, SECS_PER_HOUR)),
        'M' => Ok((3, SECS_PER_MINUTE)),
        'S' => Ok((4, 1)),
        other => Err(DurationParseError::Syntax(format!(
            "unexpected time designator `{}`",
            other
        ))),
    }
}

fn components(s: &str) -> Result<Vec<Component<'_>>, DurationParseError> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut dot = None;
    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => {}
            '.' | ',' if dot.is_none() => dot = Some(i),
            c if c.is_ascii_uppercase() => {
                let (whole, fraction) = match dot {
                    Some(d) => (&s[start..d], &s[d + 1..i]),
                    None => (&s[start..i], ""),
                };
                if whole.is_empty() {
                    return Err(DurationParseError::Syntax(format!(
                        "designator `{}` has no value",
                        c
                    )));
                }
                if dot.is_some() && fraction.is_empty() {
                    return Err(DurationParseError::Syntax(format!(
                        "designator `{}` has an empty fraction",
                        c
                    )));
                }
                out.push(Component {
                    whole,
                    fraction,
                    designator: c,
                });
                start = i + 1;
                dot = None;
            }
            other => {
                return Err(DurationParseError::Syntax(format!(
                    "unexpected character `{}`",
                    other
                )))
            }
        }
    }
    if start != s.len() {
        return Err(DurationParseError::Syntax(format!(
            "`{}` is missing a designator",
            &s[start..]
        )));
    }
    Ok(out)
}

fn component_nanos(
    component: &Component<'_>,
    (_, unit_secs): (usize, u64),
) -> Result<u128, DurationParseError> {
    let whole: u128 = component
        .whole
        .parse::<u64>()
        .map_err(|_| DurationParseError::Overflow)?
        .into();
    let unit_nanos = u128::from(unit_secs) * NANOS_PER_SEC;
    let fraction = fraction_nanos(component.fraction)? * u128::from(unit_secs);
    whole
        .checked_mul(unit_nanos)
        .and_then(|n| n.checked_add(fraction))
        .ok_or(DurationParseError::Overflow)
}

/// Nanoseconds in a fractional second written as digits after the point.
/// Digits beyond nanosecond precision are dropped.
fn fraction_nanos(digits: &str) -> Result<u128, DurationParseError> {
    if digits.is_empty() {
        return Ok(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationParseError::Syntax(format!(
            "invalid fraction `{}`",
            digits
        )));
    }
    let truncated: String = digits.chars().take(9).collect();
    format!("{:0<9}", truncated)
        .parse::<u128>()
        .map_err(|e| DurationParseError::Syntax(e.to_string()))
}

fn from_nanos(total: u128) -> Result<Duration, DurationParseError> {
    let secs = total / NANOS_PER_SEC;
    if secs > u128::from(u64::MAX) {
        return Err(DurationParseError::Overflow);
    }
    Ok(Duration::new(secs as u64, (total % NANOS_PER_SEC) as u32))
}

/// `[d.]hh:mm:ss[.fffffff]`
fn parse_timespan(s: &str) -> Result<Duration, DurationParseError> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(DurationParseError::Syntax(format!(
            "`{}` is neither an ISO-8601 duration nor hh:mm:ss",
            s
        )));
    }

    let (days, hours) = match parts[0].split_once('.') {
        Some((d, h)) => (clock_field(d, "days", None)?, h),
        None => (0, parts[0]),
    };
    let hours = clock_field(hours, "hours", Some(23))?;
    let minutes = clock_field(parts[1], "minutes", Some(59))?;
    let (seconds, fraction) = match parts[2].split_once('.') {
        Some((s, f)) => (s, f),
        None => (parts[2], ""),
    };
    let seconds = clock_field(seconds, "seconds", Some(59))?;
    if parts[2].contains('.') && fraction.is_empty() {
        return Err(DurationParseError::Syntax("empty fraction".to_string()));
    }

    let secs = days
        .checked_mul(SECS_PER_DAY)
        .and_then(|d| d.checked_add(hours * SECS_PER_HOUR + minutes * SECS_PER_MINUTE + seconds))
        .ok_or(DurationParseError::Overflow)?;
    from_nanos(u128::from(secs) * NANOS_PER_SEC + fraction_nanos(fraction)?)
}

fn clock_field(
    digits: &str,
    field: &'static str,
    max: Option<u64>,
) -> Result<u64, DurationParseError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationParseError::Syntax(format!(
            "invalid {} `{}`",
            field, digits
        )));
    }
    let value = digits
        .parse::<u64>()
        .map_err(|_| DurationParseError::Overflow)?;
    match max {
        Some(max) if value > max => Err(DurationParseError::OutOfRange { field, value }),
        _ => Ok(value),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_iso_components() {
        assert_eq!(parse("PT20S"), Ok(Duration::from_secs(20)));
        assert_eq!(parse("PT1H30M"), Ok(Duration::from_secs(5400)));
        assert_eq!(
            parse("P1DT2H3M4S"),
            Ok(Duration::from_secs(86400 + 7200 + 180 + 4))
        );
        assert_eq!(parse("P2W"), Ok(Duration::from_secs(14 * 86400)));
        assert_eq!(parse("PT0.5S"), Ok(Duration::from_millis(500)));
        assert_eq!(parse("PT1,25S"), Ok(Duration::from_millis(1250)));
        assert_eq!(parse("PT1.5M"), Ok(Duration::from_secs(90)));
    }

    #[test]
    fn test_parse_timespan() {
        assert_eq!(parse("00:00:20"), Ok(Duration::from_secs(20)));
        assert_eq!(parse("01:30:00"), Ok(Duration::from_secs(5400)));
        assert_eq!(
            parse("1.02:00:00"),
            Ok(Duration::from_secs(86400 + 7200))
        );
        assert_eq!(
            parse("00:00:00.1234567"),
            Ok(Duration::from_nanos(123_456_700))
        );
    }

    #[test]
    fn test_parse_rejects_invalid_input() {
        assert_eq!(parse(""), Err(DurationParseError::Empty));
        assert_eq!(parse("-PT1S"), Err(DurationParseError::Negative));
        assert_eq!(
            parse("P1Y"),
            Err(DurationParseError::CalendarComponent('Y'))
        );
        assert_eq!(
            parse("P1M"),
            Err(DurationParseError::CalendarComponent('M'))
        );
        assert!(matches!(
            parse("not-a-duration"),
            Err(DurationParseError::Syntax(_))
        ));
        assert!(matches!(parse("P"), Err(DurationParseError::Syntax(_))));
        assert!(matches!(parse("PT"), Err(DurationParseError::Syntax(_))));
        assert!(matches!(parse("PT5"), Err(DurationParseError::Syntax(_))));
        assert!(matches!(
            parse("PT1.5H30M"),
            Err(DurationParseError::Syntax(_))
        ));
        assert!(matches!(parse("PTS"), Err(DurationParseError::Syntax(_))));
        assert!(matches!(
            parse("PT1S1H"),
            Err(DurationParseError::Syntax(_))
        ));
        assert!(matches!(
            parse("PT1H1H"),
            Err(DurationParseError::Syntax(_))
        ));
        assert!(matches!(parse("PT1.S"), Err(DurationParseError::Syntax(_))));
        assert!(matches!(parse("P1.DT1H"), Err(DurationParseError::Syntax(_))));
        assert!(matches!(parse(" PT1S"), Err(DurationParseError::Syntax(_))));
        assert!(matches!(parse("PT1S\n"), Err(DurationParseError::Syntax(_))));
        assert_eq!(
            parse("00:61:00"),
            Err(DurationParseError::OutOfRange {
                field: "minutes",
                value: 61
            })
        );
    }

    #[test]
    fn test_format_is_canonical() {
        assert_eq!(format(Duration::ZERO), "PT0S");
        assert_eq!(format(Duration::from_secs(20)), "PT20S");
        assert_eq!(format(Duration::from_secs(5400)), "PT1H30M");
        assert_eq!(format(Duration::from_secs(86400)), "P1D");
        assert_eq!(
            format(Duration::from_secs(86400 + 3600 + 1)),
            "P1DT1H1S"
        );
        assert_eq!(format(Duration::from_millis(1500)), "PT1.5S");
        assert_eq!(format(Duration::from_nanos(1)), "PT0.000000001S");
    }

    #[test]
    fn test_formatted_output_parses_back() {
        for d in [
            Duration::ZERO,
            Duration::from_nanos(987_654_321),
            Duration::from_secs(7 * 86400 + 59),
            Duration::new(3_600 * 36, 10),
        ] {
            assert_eq!(parse(&format(d)), Ok(d));
        }
    }
}
