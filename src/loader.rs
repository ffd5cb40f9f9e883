//! Fetch-and-cache pipeline for the program feed.
//!
//! `ProgramLoader` balances freshness against availability: fresh cache
//! hits skip the network entirely, successful fetches overwrite the
//! cache, and fetch failures fall back to whatever cached data exists,
//! expired or not. Only when no cached data exists at all does a failure
//! surface to the caller.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::api::{FeedClient, FeedError};
use crate::cache::CacheManager;
use crate::models::{Program, ProgramCollection, ProgramStatus};
use crate::parser;

/// Rows with fewer columns than this are logged before padding.
/// The registration link column is a later addition and may be absent
/// from older sheets.
const MIN_COLUMNS: usize = 9;

pub struct ProgramLoader {
    client: FeedClient,
    cache: CacheManager,
}

impl ProgramLoader {
    pub fn new(client: FeedClient, cache: CacheManager) -> Self {
        Self { client, cache }
    }

    /// Produce the categorized program collection.
    ///
    /// `force_refresh` evicts the cache up front, before fetching, so a
    /// stale entry cannot be served by a failure path later in the same
    /// call.
    pub async fn load(&self, force_refresh: bool) -> Result<ProgramCollection, FeedError> {
        if force_refresh {
            info!("force refresh requested, evicting cache");
            self.cache.evict();
        } else if let Some(cached) = self.cache.load_fresh() {
            info!("serving programs from cache");
            return Ok(cached);
        }

        let text = match self.client.fetch_csv().await {
            Ok(text) => text,
            Err(err) => {
                // Prefer stale data over a visible error on a public page
                if let Some(stale) = self.cache.load_any() {
                    warn!(error = %err, age = %stale.age_display(), "fetch failed, serving stale cache");
                    return Ok(stale.data);
                }
                return Err(err);
            }
        };

        let today = Local::now().date_naive();
        match process_feed(&text, today) {
            Some(collection) => {
                info!(
                    total = collection.len(),
                    upcoming = collection.upcoming.len(),
                    past = collection.past.len(),
                    "program feed processed"
                );
                self.cache.save(&collection);
                Ok(collection)
            }
            None => {
                warn!("feed contained no data rows");
                Ok(ProgramCollection::default())
            }
        }
    }

    /// Human-readable age of the cached collection, if one exists.
    pub fn cache_age(&self) -> Option<String> {
        self.cache.age_display()
    }
}

/// Parse, validate, and categorize a raw CSV body against `today`.
///
/// Returns `None` when the body is empty or holds only a header row;
/// such results are not worth caching.
pub fn process_feed(text: &str, today: NaiveDate) -> Option<ProgramCollection> {
    if text.trim().is_empty() {
        return None;
    }

    let rows = parser::parse_rows(text);
    if rows.len() <= 1 {
        return None;
    }

    // Skip the header row; short rows are padded, not rejected
    let programs: Vec<Program> = rows[1..]
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() < MIN_COLUMNS {
                warn!(row = i + 2, columns = row.len(), "row has too few columns, padding");
            }
            Program::from_row(row)
        })
        .filter(Program::is_valid)
        .collect();

    Some(categorize(programs, today))
}

/// Split programs into upcoming and past. An explicit status wins over
/// the date comparison; otherwise a program is upcoming only when its
/// date is strictly after today.
fn categorize(programs: Vec<Program>, today: NaiveDate) -> ProgramCollection {
    let mut upcoming = Vec::new();
    let mut past = Vec::new();

    for program in programs {
        let is_upcoming = match program.status() {
            ProgramStatus::Upcoming => true,
            ProgramStatus::Completed | ProgramStatus::Cancelled => false,
            ProgramStatus::Other => matches!(program.date_key(), Some(d) if d > today),
        };
        if is_upcoming {
            upcoming.push(program);
        } else {
            past.push(program);
        }
    }

    // Stable sorts; records with unparseable dates go last on both sides
    upcoming.sort_by_key(|p| p.date_key().unwrap_or(NaiveDate::MAX));
    past.sort_by_key(|p| std::cmp::Reverse(p.date_key().unwrap_or(NaiveDate::MIN)));

    ProgramCollection { upcoming, past }
}
