use anyhow::Result;
use uuid::Uuid;

use crate::model::away_date::AwayDate;
use crate::model::chore::Chore;
use crate::model::log::CompletionLog;
use crate::model::tag::Tag;

pub trait ChoreRepository {
    fn create(&self, chore: Chore) -> Result<Chore>;
    fn get(&self, id: &Uuid) -> Result<Chore>;
    fn update(&self, chore: &Chore) -> Result<()>;
    fn delete(&self, id: &Uuid) -> Result<()>;
    /// Insertion order; urgency ordering is the list builder's job.
    fn list(&self, owner: &Uuid) -> Result<Vec<Chore>>;
}

pub trait LogRepository {
    fn append(&self, log: CompletionLog) -> Result<CompletionLog>;
    /// The completion with the latest timestamp, if any.
    fn latest_for(&self, chore_id: &Uuid) -> Result<Option<CompletionLog>>;
    /// Drops every log of a chore; used when the chore itself goes away.
    fn delete_for(&self, chore_id: &Uuid) -> Result<()>;
}

pub trait TagRepository {
    fn create(&self, tag: Tag) -> Result<Tag>;
    fn delete(&self, id: &Uuid) -> Result<()>;
    fn list(&self, owner: &Uuid) -> Result<Vec<Tag>>;
    fn find_by_name(&self, owner: &Uuid, name: &str) -> Result<Option<Tag>>;
}

pub trait AwayDateRepository {
    fn create(&self, away_date: AwayDate) -> Result<AwayDate>;
    fn delete(&self, id: &Uuid) -> Result<()>;
    fn list(&self, owner: &Uuid) -> Result<Vec<AwayDate>>;
}
