use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use log::debug;
use uuid::Uuid;

use crate::model::chore::Chore;
use crate::model::log::CompletionLog;
use crate::repository::traits::{ChoreRepository, LogRepository};

/// Chore CRUD plus completion recording. Every operation is scoped to an
/// owner; touching another user's chore reads as "not found".
pub struct ChoreService<C: ChoreRepository, L: LogRepository> {
    chores: C,
    logs: L,
}

impl<C: ChoreRepository, L: LogRepository> ChoreService<C, L> {
    pub fn new(chores: C, logs: L) -> Self {
        Self { chores, logs }
    }

    pub fn create(&self, chore: Chore) -> Result<Chore> {
        if chore.name.trim().is_empty() {
            return Err(anyhow!("A chore needs a name"));
        }
        debug!("creating chore {} ({})", chore.name, chore.id);
        self.chores.create(chore)
    }

    pub fn get(&self, owner: &Uuid, id: &Uuid) -> Result<Chore> {
        let chore = self.chores.get(id)?;
        if chore.owner != *owner {
            return Err(anyhow!("Chore with ID {} not found", id));
        }
        Ok(chore)
    }

    pub fn update(&self, owner: &Uuid, chore: &Chore) -> Result<()> {
        self.get(owner, &chore.id)?;
        self.chores.update(chore)
    }

    /// Removes the chore together with its completion history.
    pub fn delete(&self, owner: &Uuid, id: &Uuid) -> Result<()> {
        self.get(owner, id)?;
        debug!("deleting chore {}", id);
        self.logs.delete_for(id)?;
        self.chores.delete(id)
    }

    /// Records a completion at `at`. The clock is the caller's collaborator
    /// so listings and completions can share one captured "now".
    pub fn complete(&self, owner: &Uuid, id: &Uuid, at: DateTime<Utc>) -> Result<CompletionLog> {
        let chore = self.get(owner, id)?;
        debug!("completing chore {} at {}", chore.name, at);
        self.logs.append(CompletionLog::new(at, chore.id, *owner))
    }

    pub fn last_completed_at(&self, id: &Uuid) -> Result<Option<DateTime<Utc>>> {
        Ok(self.logs.latest_for(id)?.map(|log| log.timestamp))
    }

    pub fn list(&self, owner: &Uuid) -> Result<Vec<Chore>> {
        self.chores.list(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::file::{FileChoreRepository, FileLogRepository};
    use chrono::Duration;
    use tempfile::tempdir;

    fn service(dir: &std::path::Path) -> ChoreService<FileChoreRepository, FileLogRepository> {
        ChoreService::new(
            FileChoreRepository::new(Some(dir.to_path_buf())).unwrap(),
            FileLogRepository::new(Some(dir.to_path_buf())).unwrap(),
        )
    }

    #[test]
    fn test_complete_appends_latest_log() {
        let dir = tempdir().unwrap();
        let service = service(dir.path());
        let owner = Uuid::new_v4();
        let chore = service
            .create(Chore::new("Vacuum".to_string(), 7, owner))
            .unwrap();

        assert_eq!(service.last_completed_at(&chore.id).unwrap(), None);

        let now = Utc::now();
        service.complete(&owner, &chore.id, now - Duration::days(7)).unwrap();
        service.complete(&owner, &chore.id, now).unwrap();

        assert_eq!(service.last_completed_at(&chore.id).unwrap(), Some(now));
    }

    #[test]
    fn test_other_owner_is_not_found() {
        let dir = tempdir().unwrap();
        let service = service(dir.path());
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let chore = service
            .create(Chore::new("Vacuum".to_string(), 7, owner))
            .unwrap();

        assert!(service.get(&stranger, &chore.id).is_err());
        assert!(service.complete(&stranger, &chore.id, Utc::now()).is_err());
        assert!(service.delete(&stranger, &chore.id).is_err());
        assert!(service.get(&owner, &chore.id).is_ok());
    }

    #[test]
    fn test_delete_drops_logs() {
        let dir = tempdir().unwrap();
        let service = service(dir.path());
        let owner = Uuid::new_v4();
        let chore = service
            .create(Chore::new("Vacuum".to_string(), 7, owner))
            .unwrap();

        service.complete(&owner, &chore.id, Utc::now()).unwrap();
        service.delete(&owner, &chore.id).unwrap();

        assert_eq!(service.last_completed_at(&chore.id).unwrap(), None);
        assert!(service.list(&owner).unwrap().is_empty());
    }

    #[test]
    fn test_blank_name_rejected() {
        let dir = tempdir().unwrap();
        let service = service(dir.path());

        assert!(service
            .create(Chore::new("  ".to_string(), 1, Uuid::new_v4()))
            .is_err());
    }
}
