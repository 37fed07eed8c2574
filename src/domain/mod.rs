//! Domain aggregates managed through the dashboard.

pub mod company;
pub mod event;
pub mod event_music;
pub mod group;
pub mod package;
pub mod profile;
pub mod types;
