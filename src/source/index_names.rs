//! Day-bucketed index name derivation.
//!
//! A run must visit one index per calendar day between the source's cursor
//! and tomorrow (UTC), newest first. The window is padded by one day so the
//! current day is always covered, even when the cursor sits at "now".

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use super::offset::{format_round_trip, parse_offset_point};
use super::view::DiagnosticsSource;
use crate::config::{DEFAULT_INDEX_DATE_FORMAT, SchedulingConfig};
use crate::core::{Result, SourceError};

fn days(count: i64) -> Result<TimeDelta> {
    TimeDelta::try_days(count).ok_or_else(|| {
        SourceError::Configuration(format!("{} days is out of range", count))
    })
}

impl DiagnosticsSource<'_> {
    /// Index names still owed, using the wall clock as "now".
    ///
    /// See [`DiagnosticsSource::get_index_names_at`].
    pub fn get_index_names(&mut self, days_to_go_back: i64) -> Result<Vec<String>> {
        self.get_index_names_at(Utc::now(), days_to_go_back)
    }

    /// Index names still owed, with window and layout taken from `config`.
    pub fn get_index_names_with(
        &mut self,
        config: &SchedulingConfig,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        config.validate()?;
        self.derive_index_names(now, config.days_to_go_back, &config.index_date_format)
    }

    /// Index names (`yyyyMMdd`) a run must visit to catch up to `now`.
    ///
    /// - A configured `IndexName` wins outright and is returned alone.
    /// - A missing or empty `LastOffsetPoint` is initialised in place to
    ///   `now - days_to_go_back`.
    /// - Otherwise one bucket per day from `now + 1 day` back to the cursor,
    ///   descending. A cursor far enough in the future yields nothing.
    ///
    /// A malformed cursor, or one stored as anything but text, is returned as
    /// [`SourceError::InvalidOffset`] and left untouched.
    pub fn get_index_names_at(
        &mut self,
        now: DateTime<Utc>,
        days_to_go_back: i64,
    ) -> Result<Vec<String>> {
        self.derive_index_names(now, days_to_go_back, DEFAULT_INDEX_DATE_FORMAT)
    }

    fn derive_index_names(
        &mut self,
        now: DateTime<Utc>,
        days_to_go_back: i64,
        date_format: &str,
    ) -> Result<Vec<String>> {
        if let Some(index_name) = self.index_name().filter(|name| !name.is_empty()) {
            return Ok(vec![index_name]);
        }

        let offset_point = match self.stored_offset_point()? {
            Some(point) => point,
            None => {
                let start = now
                    .checked_sub_signed(days(days_to_go_back)?)
                    .ok_or_else(|| {
                        SourceError::Configuration(format!(
                            "cannot go back {} days from {}",
                            days_to_go_back, now
                        ))
                    })?;
                let point = format_round_trip(&start.fixed_offset());
                debug!(
                    source = %self.key(),
                    offset_point = %point,
                    "Initialising last offset point"
                );
                self.set_last_offset_point(Some(point.clone()));
                point
            }
        };

        let cursor = parse_offset_point(&offset_point)?.with_timezone(&Utc);

        let horizon = now.checked_add_signed(days(1)?).ok_or_else(|| {
            SourceError::Configuration(format!("{} is at the end of the calendar", now))
        })?;
        let bucket_count = horizon.signed_duration_since(cursor).num_days() + 1;
        if bucket_count <= 0 {
            return Ok(Vec::new());
        }

        let names: Vec<String> = (0..bucket_count)
            .map(|offset| (horizon - TimeDelta::days(offset)).format(date_format).to_string())
            .collect();

        debug!(
            source = %self.key(),
            buckets = names.len(),
            "Derived index names"
        );
        Ok(names)
    }
}
