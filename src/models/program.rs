use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::drive;

/// One program entry, mapped from a single row of the published sheet.
///
/// All fields default to empty strings; a program is only retained when
/// both `title` and `date` survive trimming (see `is_valid`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub title: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub image_url: String,
    pub linkedin_url: String,
    pub location: String,
    pub category: String,
    pub status: String,
    pub registration_url: String,
}

impl Program {
    /// Build a program from one data row. Missing trailing columns read
    /// as empty, so short rows degrade instead of being rejected. The
    /// image link is rewritten to a directly renderable form.
    pub fn from_row(row: &[String]) -> Self {
        let col = |i: usize| row.get(i).map(|s| s.trim()).unwrap_or("").to_string();
        Self {
            title: col(0),
            date: col(1),
            time: col(2),
            description: col(3),
            image_url: drive::direct_image_url(&col(4)),
            linkedin_url: col(5),
            location: col(6),
            category: col(7),
            status: col(8),
            registration_url: col(9),
        }
    }

    /// A row only counts as a program when it names something and says when.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() && !self.date.is_empty()
    }

    /// Event date at day granularity; `None` when the date column does
    /// not parse as `YYYY-MM-DD`.
    pub fn date_key(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn status(&self) -> ProgramStatus {
        ProgramStatus::parse(&self.status)
    }
}

/// Status column values the sheet editors use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramStatus {
    Upcoming,
    Completed,
    Cancelled,
    Other,
}

impl ProgramStatus {
    /// Exact, case-sensitive match on the sheet's literal status values.
    /// Anything unrecognized falls through to date-based classification.
    pub fn parse(s: &str) -> Self {
        match s {
            "Upcoming" => ProgramStatus::Upcoming,
            "Completed" => ProgramStatus::Completed,
            "Cancelled" => ProgramStatus::Cancelled,
            _ => ProgramStatus::Other,
        }
    }
}

/// Programs partitioned for display: `upcoming` ascending by date,
/// `past` descending. The two lists are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramCollection {
    pub upcoming: Vec<Program>,
    pub past: Vec<Program>,
}

impl ProgramCollection {
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.past.is_empty()
    }

    pub fn len(&self) -> usize {
        self.upcoming.len() + self.past.len()
    }
}
