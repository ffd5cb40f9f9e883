//! Data models for the program feed.
//!
//! - `Program`: one parsed, validated sheet row
//! - `ProgramStatus`: typed view of the status column
//! - `ProgramCollection`: the upcoming/past partition served to callers

pub mod program;

pub use program::{Program, ProgramCollection, ProgramStatus};
