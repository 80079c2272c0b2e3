use anyhow::{anyhow, Result};
use log::debug;
use uuid::Uuid;

use crate::model::away_date::AwayDate;
use crate::repository::traits::AwayDateRepository;

/// Away-date CRUD. Ranges are validated here so the scheduler downstream
/// can assume well-formed input.
pub struct AwayDateService<A: AwayDateRepository> {
    away_dates: A,
}

impl<A: AwayDateRepository> AwayDateService<A> {
    pub fn new(away_dates: A) -> Self {
        Self { away_dates }
    }

    pub fn create(&self, away_date: AwayDate) -> Result<AwayDate> {
        if away_date.name.trim().is_empty() {
            return Err(anyhow!("An away date needs a name"));
        }
        away_date.validate()?;
        debug!(
            "creating away date {} ({} - {})",
            away_date.name, away_date.start_date, away_date.end_date
        );
        self.away_dates.create(away_date)
    }

    pub fn delete(&self, owner: &Uuid, name: &str) -> Result<()> {
        let away = self
            .list(owner)?
            .into_iter()
            .find(|away| away.name == name.trim())
            .ok_or_else(|| anyhow!("No such away date: {}", name))?;
        self.away_dates.delete(&away.id)
    }

    pub fn list(&self, owner: &Uuid) -> Result<Vec<AwayDate>> {
        self.away_dates.list(owner)
    }
}
