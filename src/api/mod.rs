//! HTTP access to the upstream program feed.
//!
//! The feed is a publicly shared spreadsheet CSV export: no
//! authentication, one GET per refresh, bounded by a 10-second timeout.

pub mod client;
pub mod error;

pub use client::FeedClient;
pub use error::FeedError;
