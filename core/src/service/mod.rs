pub mod away_service;
pub mod chore_service;
pub mod dto;
pub mod status_service;
pub mod tag_service;
