use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-declared absence. Any calendar day inside the range is a blackout
/// day: due/overdue clocks pass through it without counting it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AwayDate {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub owner: Uuid,
}

impl AwayDate {
    pub fn new(name: String, start_date: NaiveDate, end_date: NaiveDate, owner: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            start_date,
            end_date,
            owner,
        }
    }

    /// Inclusive on both ends; start == end marks a single-day absence.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Must hold before the range is stored or fed to the scheduler.
    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(anyhow!("The start date must be on or before the end date"));
        }
        Ok(())
    }
}
