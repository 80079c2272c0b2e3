use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const CONFIG_FILE: &str = "config.json";

/// Local profile stored next to the data files. All records created by
/// this installation carry its owner id.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub owner: Uuid,
}

impl Config {
    pub fn load_or_create(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let config = serde_json::from_reader(reader)?;
            return Ok(config);
        }

        fs::create_dir_all(data_dir)?;
        let config = Config {
            owner: Uuid::new_v4(),
        };
        info!("created profile {} in {}", config.owner, data_dir.display());
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, &config)?;
        writer.flush()?;
        Ok(config)
    }
}
