use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded completion of a chore. Logs are append-only; the one with
/// the latest timestamp is the chore's "last completed at".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionLog {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub chore_id: Uuid,
    pub owner: Uuid,
}

impl CompletionLog {
    pub fn new(timestamp: DateTime<Utc>, chore_id: Uuid, owner: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            chore_id,
            owner,
        }
    }
}
