//! Two people, a list of restaurants, three courses each scored from 1 to 5.
//!
//! The crate keeps the restaurant list, the saved ratings and the rating being
//! drafted, and computes per-user and overall leaderboards from them. Front ends
//! talk to [`App`] and render whatever it returns.

pub mod app;
pub mod config;
pub mod data;
pub mod draft;
pub mod error;
pub mod ranking;
pub mod registry;
pub mod store;

pub use app::{App, Snapshot, UserRanking};
pub use config::{AppConfig, AppConfigBuilder};
pub use data::{Average, Category, Rating, Score, User};
pub use error::RatingError;
pub use ranking::{OverallEntry, Ranked, UserEntry};
