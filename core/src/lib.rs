pub mod input;
pub mod model;
pub mod repository;
pub mod schedule;
pub mod service;
pub mod usecase;

pub use model::away_date::AwayDate;
pub use model::chore::Chore;
pub use model::log::CompletionLog;
pub use model::status::{ChoreState, ChoreStatus};
pub use model::tag::Tag;
pub use repository::{
    default_data_dir, AwayDateRepository, ChoreRepository, FileAwayDateRepository,
    FileChoreRepository, FileLogRepository, FileTagRepository, LogRepository, TagRepository,
};
pub use input::{parse_input, ParsedInput};
pub use schedule::{advance, parse_date, parse_day_duration};
pub use service::away_service::AwayDateService;
pub use service::chore_service::ChoreService;
pub use service::dto::ChoreOverview;
pub use service::status_service::{compute_status, weight};
pub use service::tag_service::TagService;
pub use usecase::listing::{Bucket, ChoreListing, GroupedChores};
