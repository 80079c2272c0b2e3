use anyhow::{anyhow, Result};
use log::debug;
use uuid::Uuid;

use crate::model::tag::Tag;
use crate::repository::traits::TagRepository;

pub struct TagService<T: TagRepository> {
    tags: T,
}

impl<T: TagRepository> TagService<T> {
    pub fn new(tags: T) -> Self {
        Self { tags }
    }

    /// Tag names are unique per owner.
    pub fn create(&self, owner: &Uuid, name: &str) -> Result<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("A tag needs a name"));
        }
        if self.tags.find_by_name(owner, name)?.is_some() {
            return Err(anyhow!("Tag \"{}\" already exists", name));
        }
        debug!("creating tag {}", name);
        self.tags.create(Tag::new(name.to_string(), *owner))
    }

    pub fn delete(&self, owner: &Uuid, name: &str) -> Result<()> {
        let tag = self
            .tags
            .find_by_name(owner, name.trim())?
            .ok_or_else(|| anyhow!("No such tag: {}", name))?;
        self.tags.delete(&tag.id)
    }

    pub fn list(&self, owner: &Uuid) -> Result<Vec<Tag>> {
        self.tags.list(owner)
    }

    pub fn find(&self, owner: &Uuid, name: &str) -> Result<Option<Tag>> {
        self.tags.find_by_name(owner, name.trim())
    }
}
