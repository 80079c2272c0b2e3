use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a chore, least to most urgent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChoreState {
    Completed,
    Due,
    Overdue,
}

impl fmt::Display for ChoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Due => write!(f, "Due"),
            Self::Overdue => write!(f, "Overdue"),
        }
    }
}

/// Snapshot of where a chore sits in its cycle, derived against a single
/// "now". It depends on that instant and is recomputed on every evaluation,
/// never cached or persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoreStatus {
    pub state: ChoreState,

    /// The state this chore moves to next, if one is predictable.
    pub next_state: Option<ChoreState>,

    /// Progress through the current window toward `next_state`, in percent,
    /// rounded to two decimals. 0 when there is no next state.
    pub percentage: f64,

    /// When the chore falls (or fell) due. Absent for a chore that was
    /// never completed.
    pub next_due: Option<DateTime<Utc>>,

    /// When the chore turns (or turned) overdue. Absent without an overdue
    /// duration or a completion.
    pub next_overdue: Option<DateTime<Utc>>,
}
