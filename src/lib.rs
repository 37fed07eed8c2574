//! Headless core of the DJ event-request admin dashboard.
//!
//! The data layer (`domain`, `dto`, `forms`) compiles on its own with the
//! `data` feature. The `client` feature adds the REST repository, the select
//! and table engines, the entity adapters and the live board bridge.

pub mod domain;
pub mod dto;
pub mod forms;

#[cfg(feature = "client")]
pub mod adapters;
#[cfg(feature = "client")]
pub mod alerts;
#[cfg(feature = "client")]
pub mod engine;
#[cfg(feature = "client")]
pub mod live;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod pagination;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;

/// Options fetched per page by the select engines and rows per page of a
/// fresh table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Debounce applied to select text input, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Rows-per-page choices offered by every table.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 25, 50];
