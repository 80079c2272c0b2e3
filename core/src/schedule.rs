use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::model::away_date::AwayDate;

/// Advances `start` by `days` whole days, skipping any calendar day covered
/// by one of the owner's away ranges. A skipped day still moves the cursor,
/// so blackout days occupy calendar time without counting toward the
/// duration. The time of day of `start` is preserved; only the date moves.
///
/// `away_dates` must already be filtered to the owning user's ranges.
pub fn advance(start: DateTime<Utc>, days: u32, away_dates: &[AwayDate]) -> DateTime<Utc> {
    let mut cursor = start.date_naive();
    let mut remaining = days;

    while remaining > 0 {
        cursor = cursor + Duration::days(1);
        if !away_dates.iter().any(|away| away.covers(cursor)) {
            remaining -= 1;
        }
    }

    start + (cursor - start.date_naive())
}

/// Parses a whole-day duration: "3", "3d", "2w", "1 day", "10 days",
/// "2 weeks". Hour and minute granularity is rejected; due and overdue
/// clocks run on whole days only.
pub fn parse_day_duration(input: &str) -> Result<u32> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty duration string"));
    }
    if !input.is_ascii() {
        return Err(anyhow!("Could not parse duration: {}", input));
    }

    // "1 day" / "2 weeks" spelling
    if let Some((num_str, unit)) = input.split_once(' ') {
        let num: u32 = num_str
            .parse()
            .map_err(|_| anyhow!("Invalid duration number: {}", num_str))?;
        return match unit.trim().to_lowercase().as_str() {
            "day" | "days" => Ok(num),
            "week" | "weeks" => Ok(num * 7),
            "hour" | "hours" | "minute" | "minutes" => {
                Err(anyhow!("The duration must be specified in whole days"))
            }
            other => Err(anyhow!("Unknown duration unit: {}", other)),
        };
    }

    // Bare day count
    if let Ok(num) = input.parse::<u32>() {
        return Ok(num);
    }

    // Suffix spelling: "3d", "2w"
    let (num_str, unit) = input.split_at(input.len() - 1);
    let num: u32 = num_str
        .parse()
        .map_err(|_| anyhow!("Invalid duration number: {}", num_str))?;
    match unit.to_lowercase().as_str() {
        "d" => Ok(num),
        "w" => Ok(num * 7),
        "h" | "m" => Err(anyhow!("The duration must be specified in whole days")),
        other => Err(anyhow!("Unknown duration unit: {}", other)),
    }
}

/// Parses a calendar date in ISO form, e.g. "2026-08-10".
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse date: {} (expected YYYY-MM-DD)", input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn day0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 9, 30, 0).unwrap()
    }

    fn away(start: NaiveDate, end: NaiveDate) -> AwayDate {
        AwayDate::new("away".to_string(), start, end, Uuid::new_v4())
    }

    fn days(n: i64) -> Duration {
        Duration::days(n)
    }

    #[test]
    fn test_zero_days_returns_start() {
        let start = day0();
        let range = away(start.date_naive(), start.date_naive() + days(30));

        assert_eq!(advance(start, 0, &[range]), start);
        assert_eq!(advance(start, 0, &[]), start);
    }

    #[test]
    fn test_no_away_dates_is_plain_addition() {
        let start = day0();

        assert_eq!(advance(start, 1, &[]), start + days(1));
        assert_eq!(advance(start, 14, &[]), start + days(14));
    }

    #[test]
    fn test_preserves_time_of_day() {
        let start = day0();
        let range = away(
            start.date_naive() + days(1),
            start.date_naive() + days(1),
        );

        let result = advance(start, 1, &[range]);
        assert_eq!(result, start + days(2));
        assert_eq!(result.time(), start.time());
    }

    #[test]
    fn test_range_directly_ahead_is_skipped() {
        // Away on day+1 and day+2: two counted days land on day+3 and day+4.
        let start = day0();
        let range = away(
            start.date_naive() + days(1),
            start.date_naive() + days(2),
        );

        assert_eq!(advance(start, 2, &[range]), start + days(4));
    }

    #[test]
    fn test_range_overlapping_start() {
        // Away [day-1, day+1]: day+1 is skipped, day+2 and day+3 count.
        let start = day0();
        let range = away(
            start.date_naive() - days(1),
            start.date_naive() + days(1),
        );

        assert_eq!(advance(start, 2, &[range]), start + days(3));
    }

    #[test]
    fn test_multiple_ranges() {
        let start = day0();
        let ranges = vec![
            away(start.date_naive() + days(1), start.date_naive() + days(3)),
            away(start.date_naive() + days(2), start.date_naive() + days(4)),
            away(start.date_naive() + days(6), start.date_naive() + days(8)),
        ];

        assert_eq!(advance(start, 3, &ranges), start + days(10));
    }

    #[test]
    fn test_overlapping_ranges_match_their_union() {
        let start = day0();
        let overlapping = vec![
            away(start.date_naive() + days(1), start.date_naive() + days(3)),
            away(start.date_naive() + days(3), start.date_naive() + days(5)),
        ];
        let merged = vec![away(
            start.date_naive() + days(1),
            start.date_naive() + days(5),
        )];

        assert_eq!(advance(start, 4, &overlapping), advance(start, 4, &merged));
        assert_eq!(advance(start, 4, &merged), start + days(9));
    }

    #[test]
    fn test_result_never_earlier_than_plain_addition() {
        let start = day0();
        let ranges = vec![
            away(start.date_naive() + days(2), start.date_naive() + days(2)),
            away(start.date_naive() + days(9), start.date_naive() + days(12)),
        ];

        for d in 0..20u32 {
            assert!(advance(start, d, &ranges) >= start + days(i64::from(d)));
        }
    }

    #[test]
    fn test_parse_day_duration() {
        assert_eq!(parse_day_duration("3").unwrap(), 3);
        assert_eq!(parse_day_duration("3d").unwrap(), 3);
        assert_eq!(parse_day_duration("2w").unwrap(), 14);
        assert_eq!(parse_day_duration("1 day").unwrap(), 1);
        assert_eq!(parse_day_duration("10 days").unwrap(), 10);
        assert_eq!(parse_day_duration("2 weeks").unwrap(), 14);
        assert_eq!(parse_day_duration(" 5d ").unwrap(), 5);
    }

    #[test]
    fn test_parse_day_duration_rejects_sub_day_units() {
        assert!(parse_day_duration("90m").is_err());
        assert!(parse_day_duration("2h").is_err());
        assert!(parse_day_duration("3 hours").is_err());
    }

    #[test]
    fn test_parse_day_duration_rejects_garbage() {
        assert!(parse_day_duration("").is_err());
        assert!(parse_day_duration("soon").is_err());
        assert!(parse_day_duration("-1d").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-08-10").unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()
        );
        assert!(parse_date("10/08/2026").is_err());
    }
}
