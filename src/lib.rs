//! Riot API match analysis and champion recommendation reports.
//!
//! The crate resolves a Riot ID, pulls recent matches or champion mastery
//! through a retrying client, and renders one plain-text report.

pub mod analysis;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod identity;
pub mod logging;
pub mod service;
pub mod tool;

pub use api::client::RiotApiClient;
pub use config::Config;
pub use error::AppError;
pub use service::{AnalysisRequest, Analyzer, RequestType};
