use chrono::{DateTime, Duration, Utc};

use crate::model::away_date::AwayDate;
use crate::model::status::{ChoreState, ChoreStatus};
use crate::schedule::advance;

// Weight bands. Any Overdue chore outranks any Due chore, which outranks
// any Completed chore; within a band the progress percentage decides.
const DUE_BAND: f64 = 100.0;
const OVERDUE_BAND: f64 = 200.0;

/// Derives where a chore sits in its Completed -> Due -> Overdue cycle at
/// `now`. Pure; the caller captures `now` and the owner's away ranges once
/// per listing so every chore is judged against the same snapshot.
///
/// A chore that was never completed is immediately Due with no predictable
/// transition. Otherwise the due point is the last completion advanced by
/// `due_days` (away days stretch the calendar, see `schedule::advance`),
/// and the overdue point is the due point advanced by `overdue_days`.
pub fn compute_status(
    now: DateTime<Utc>,
    last_completed_at: Option<DateTime<Utc>>,
    due_days: u32,
    overdue_days: Option<u32>,
    away_dates: &[AwayDate],
) -> ChoreStatus {
    let Some(last_completed_at) = last_completed_at else {
        return ChoreStatus {
            state: ChoreState::Due,
            next_state: None,
            percentage: 0.0,
            next_due: None,
            next_overdue: None,
        };
    };

    let next_due = advance(last_completed_at, due_days, away_dates);
    let next_overdue = overdue_days.map(|days| advance(next_due, days, away_dates));

    if now < next_due {
        return ChoreStatus {
            state: ChoreState::Completed,
            next_state: Some(ChoreState::Due),
            percentage: window_progress(now, last_completed_at, due_days),
            next_due: Some(next_due),
            next_overdue,
        };
    }

    match overdue_days.zip(next_overdue) {
        None => ChoreStatus {
            state: ChoreState::Due,
            next_state: None,
            percentage: 0.0,
            next_due: Some(next_due),
            next_overdue: None,
        },
        Some((grace_days, overdue_at)) if now < overdue_at => ChoreStatus {
            state: ChoreState::Due,
            next_state: Some(ChoreState::Overdue),
            percentage: window_progress(now, next_due, grace_days),
            next_due: Some(next_due),
            next_overdue: Some(overdue_at),
        },
        Some((_, overdue_at)) => ChoreStatus {
            state: ChoreState::Overdue,
            next_state: None,
            percentage: 0.0,
            next_due: Some(next_due),
            next_overdue: Some(overdue_at),
        },
    }
}

/// Collapses a status into one sortable scalar: Completed occupies 0-100,
/// Due 100-200, Overdue 200-300.
pub fn weight(status: &ChoreStatus) -> f64 {
    match status.state {
        ChoreState::Completed => status.percentage,
        ChoreState::Due => DUE_BAND + status.percentage,
        ChoreState::Overdue => OVERDUE_BAND + status.percentage,
    }
}

/// Elapsed share of a window as a percentage. The denominator is the
/// nominal duration; away days stretch the deadline, not the window length.
fn window_progress(now: DateTime<Utc>, window_start: DateTime<Utc>, window_days: u32) -> f64 {
    let window = Duration::days(i64::from(window_days));
    if window.is_zero() {
        return 0.0;
    }
    let elapsed = now - window_start;
    round2(100.0 * elapsed.num_milliseconds() as f64 / window.num_milliseconds() as f64)
}

/// Two decimal places, halves rounded away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
