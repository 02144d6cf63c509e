//! Client-side orchestration for a location-aware movie recommender.
//!
//! The crate decides which backend request to issue for each user action,
//! tracks loading and staleness per request category, renders results into a
//! host [`view::View`] and drives the detail view opened from a tile.

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod page;
pub mod render;
pub mod services;
pub mod view;

pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use events::{EventRouter, RouteOutcome, UiEvent};
pub use page::{Page, QueryOutcome};
