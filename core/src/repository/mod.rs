pub mod file;
pub mod traits;

pub use file::{
    default_data_dir, FileAwayDateRepository, FileChoreRepository, FileLogRepository,
    FileTagRepository,
};
pub use traits::{AwayDateRepository, ChoreRepository, LogRepository, TagRepository};
