use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring chore. Completions live in `CompletionLog`; the chore itself
/// only carries the cadence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Chore {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,

    /// Whole days after a completion until the chore falls due again.
    pub due_days: u32,

    /// Whole days of grace between due and overdue. A chore without one
    /// never reaches Overdue.
    pub overdue_days: Option<u32>,

    #[serde(default)]
    pub tags: Vec<Uuid>,

    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Chore {
    pub fn new(name: String, due_days: u32, owner: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            due_days,
            overdue_days: None,
            tags: Vec::new(),
            owner,
            created_at: Utc::now(),
        }
    }
}
