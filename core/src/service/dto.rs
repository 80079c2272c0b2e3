use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::chore::Chore;
use crate::model::status::{ChoreState, ChoreStatus};

/// A chore flattened for presentation: entity fields plus the status
/// computed against the listing's "now" and the weight derived from it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChoreOverview {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub due_days: u32,
    pub overdue_days: Option<u32>,
    pub tags: Vec<Uuid>,
    pub last_completed_at: Option<DateTime<Utc>>,

    pub state: ChoreState,
    pub next_state: Option<ChoreState>,
    pub percentage: f64,
    pub next_due: Option<DateTime<Utc>>,
    pub next_overdue: Option<DateTime<Utc>>,

    /// Sort key for the urgency ordering.
    pub weight: f64,
}

impl ChoreOverview {
    pub fn from_entity(
        chore: Chore,
        last_completed_at: Option<DateTime<Utc>>,
        status: ChoreStatus,
        weight: f64,
    ) -> Self {
        Self {
            id: chore.id,
            name: chore.name,
            description: chore.description,
            due_days: chore.due_days,
            overdue_days: chore.overdue_days,
            tags: chore.tags,
            last_completed_at,
            state: status.state,
            next_state: status.next_state,
            percentage: status.percentage,
            next_due: status.next_due,
            next_overdue: status.next_overdue,
            weight,
        }
    }
}
