use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::model::away_date::AwayDate;
use crate::model::chore::Chore;
use crate::model::log::CompletionLog;
use crate::model::tag::Tag;
use crate::repository::traits::{
    AwayDateRepository, ChoreRepository, LogRepository, TagRepository,
};

const CHORES_FILE: &str = "chores.json";
const LOGS_FILE: &str = "logs.json";
const TAGS_FILE: &str = "tags.json";
const AWAY_DATES_FILE: &str = "away_dates.json";

/// Default data directory, `~/.chores`.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home.join(".chores"))
}

/// A pretty-printed JSON array on disk, read fully and rewritten on every
/// mutation. Fine at chore-list scale.
#[derive(Clone)]
struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonStore<T> {
    fn open(base_dir: Option<PathBuf>, file_name: &str) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)?;
        path.push(file_name);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<T>::new())?;
            writer.flush()?;
        }

        Ok(Self {
            path,
            _marker: PhantomData,
        })
    }

    fn read(&self) -> Result<Vec<T>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let items = serde_json::from_reader(reader)?;
        Ok(items)
    }

    fn write(&self, items: &[T]) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, items)?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct FileChoreRepository {
    store: JsonStore<Chore>,
}

impl FileChoreRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: JsonStore::open(base_dir, CHORES_FILE)?,
        })
    }
}

impl ChoreRepository for FileChoreRepository {
    fn create(&self, chore: Chore) -> Result<Chore> {
        let mut chores = self.store.read()?;
        chores.push(chore.clone());
        self.store.write(&chores)?;
        Ok(chore)
    }

    fn get(&self, id: &Uuid) -> Result<Chore> {
        self.store
            .read()?
            .into_iter()
            .find(|chore| chore.id == *id)
            .ok_or_else(|| anyhow!("Chore with ID {} not found", id))
    }

    fn update(&self, chore: &Chore) -> Result<()> {
        let mut chores = self.store.read()?;
        if let Some(pos) = chores.iter().position(|c| c.id == chore.id) {
            chores[pos] = chore.clone();
            self.store.write(&chores)?;
            Ok(())
        } else {
            Err(anyhow!("Chore with ID {} not found", chore.id))
        }
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut chores = self.store.read()?;
        let initial_len = chores.len();
        chores.retain(|chore| chore.id != *id);

        if chores.len() == initial_len {
            return Err(anyhow!("Chore with ID {} not found", id));
        }

        self.store.write(&chores)?;
        Ok(())
    }

    fn list(&self, owner: &Uuid) -> Result<Vec<Chore>> {
        let mut chores = self.store.read()?;
        chores.retain(|chore| chore.owner == *owner);
        Ok(chores)
    }
}

#[derive(Clone)]
pub struct FileLogRepository {
    store: JsonStore<CompletionLog>,
}

impl FileLogRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: JsonStore::open(base_dir, LOGS_FILE)?,
        })
    }
}

impl LogRepository for FileLogRepository {
    fn append(&self, log: CompletionLog) -> Result<CompletionLog> {
        let mut logs = self.store.read()?;
        logs.push(log.clone());
        self.store.write(&logs)?;
        Ok(log)
    }

    fn latest_for(&self, chore_id: &Uuid) -> Result<Option<CompletionLog>> {
        Ok(self
            .store
            .read()?
            .into_iter()
            .filter(|log| log.chore_id == *chore_id)
            .max_by_key(|log| log.timestamp))
    }

    fn delete_for(&self, chore_id: &Uuid) -> Result<()> {
        let mut logs = self.store.read()?;
        logs.retain(|log| log.chore_id != *chore_id);
        self.store.write(&logs)
    }
}

#[derive(Clone)]
pub struct FileTagRepository {
    store: JsonStore<Tag>,
}

impl FileTagRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: JsonStore::open(base_dir, TAGS_FILE)?,
        })
    }
}

impl TagRepository for FileTagRepository {
    fn create(&self, tag: Tag) -> Result<Tag> {
        let mut tags = self.store.read()?;
        tags.push(tag.clone());
        self.store.write(&tags)?;
        Ok(tag)
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut tags = self.store.read()?;
        let initial_len = tags.len();
        tags.retain(|tag| tag.id != *id);

        if tags.len() == initial_len {
            return Err(anyhow!("Tag with ID {} not found", id));
        }

        self.store.write(&tags)?;
        Ok(())
    }

    fn list(&self, owner: &Uuid) -> Result<Vec<Tag>> {
        let mut tags = self.store.read()?;
        tags.retain(|tag| tag.owner == *owner);
        Ok(tags)
    }

    fn find_by_name(&self, owner: &Uuid, name: &str) -> Result<Option<Tag>> {
        Ok(self
            .store
            .read()?
            .into_iter()
            .find(|tag| tag.owner == *owner && tag.name == name))
    }
}

#[derive(Clone)]
pub struct FileAwayDateRepository {
    store: JsonStore<AwayDate>,
}

impl FileAwayDateRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: JsonStore::open(base_dir, AWAY_DATES_FILE)?,
        })
    }
}

impl AwayDateRepository for FileAwayDateRepository {
    fn create(&self, away_date: AwayDate) -> Result<AwayDate> {
        let mut away_dates = self.store.read()?;
        away_dates.push(away_date.clone());
        self.store.write(&away_dates)?;
        Ok(away_date)
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut away_dates = self.store.read()?;
        let initial_len = away_dates.len();
        away_dates.retain(|away| away.id != *id);

        if away_dates.len() == initial_len {
            return Err(anyhow!("Away date with ID {} not found", id));
        }

        self.store.write(&away_dates)?;
        Ok(())
    }

    fn list(&self, owner: &Uuid) -> Result<Vec<AwayDate>> {
        let mut away_dates = self.store.read()?;
        away_dates.retain(|away| away.owner == *owner);
        Ok(away_dates)
    }
}
