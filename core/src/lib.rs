//! Oldest Game Finder Core Library
//!
//! Turns a keyword into the oldest Roblox game whose title contains it:
//! search, candidate extraction, universe resolution, batched detail fetch
//! and oldest-record selection. Shared by the API server and its tests.

pub mod config;
pub mod details;
pub mod error;
pub mod extract;
pub mod fields;
pub mod pipeline;
pub mod resolve;
pub mod select;
pub mod upstream;

// Re-export commonly used types
pub use config::UpstreamConfig;
pub use error::{LookupError, UpstreamError};
pub use extract::Candidate;
pub use pipeline::{DebugReport, OldestFinder};
pub use select::OldestGame;
pub use upstream::{HttpRobloxApi, RobloxApi, SearchPage};
