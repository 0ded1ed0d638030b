//! Local calendar-day windowing
//!
//! Events are stored with UTC timestamps but bucketed by the *local* calendar
//! day, so a glass of water at 11:58pm counts toward the day the user
//! experienced, not the UTC date. A day spans `[00:00:00.000, 23:59:59.999]`
//! inclusive on both ends; an event at exactly `23:59:59.999` belongs to that
//! day and not the next.
//!
//! Everything is generic over `chrono::TimeZone` so production code passes
//! `Local` while tests pin a `FixedOffset` and stay deterministic.

use crate::events::types::{EventSet, Timestamped};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// The inclusive UTC bounds of one local calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    /// First instant of the day (00:00:00.000 local)
    pub start: DateTime<Utc>,
    /// Last instant of the day (23:59:59.999 local), inclusive
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Bounds of `date` in `tz`
    ///
    /// Returns `None` only when the timezone transition swallows the day's
    /// first or last instant entirely, which never happens for whole-hour
    /// offsets.
    pub fn of<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<Self> {
        let start_local = date.and_hms_milli_opt(0, 0, 0, 0)?;
        let end_local = date.and_hms_milli_opt(23, 59, 59, 999)?;

        let start = tz.from_local_datetime(&start_local).earliest()?;
        let end = tz.from_local_datetime(&end_local).latest()?;

        Some(Self {
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        })
    }

    /// Whether a timestamp falls within this day (both boundaries inclusive)
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}

/// The local calendar date a timestamp falls on
pub fn local_date<Tz: TimeZone>(timestamp: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// Today's local calendar date
pub fn today<Tz: TimeZone>(tz: &Tz) -> NaiveDate {
    local_date(Utc::now(), tz)
}

/// The first instant after `date` ends, in UTC (used as a cache expiry)
pub fn end_of_local_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let next = date.succ_opt().unwrap_or(date);
    DayWindow::of(next, tz)
        .map(|w| w.start)
        .unwrap_or_else(Utc::now)
}

fn on_day<T, Tz>(events: &[T], date: NaiveDate, tz: &Tz) -> Vec<T>
where
    T: Timestamped + Clone,
    Tz: TimeZone,
{
    events
        .iter()
        .filter(|e| local_date(e.timestamp(), tz) == date)
        .cloned()
        .collect()
}

fn in_range<T, Tz>(events: &[T], start: NaiveDate, end: NaiveDate, tz: &Tz) -> Vec<T>
where
    T: Timestamped + Clone,
    Tz: TimeZone,
{
    events
        .iter()
        .filter(|e| {
            let d = local_date(e.timestamp(), tz);
            d >= start && d <= end
        })
        .cloned()
        .collect()
}

impl EventSet {
    /// The subset of events whose timestamp falls on `date` in `tz`
    pub fn filter_day<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> EventSet {
        EventSet {
            food: on_day(&self.food, date, tz),
            water: on_day(&self.water, date, tz),
            cravings: on_day(&self.cravings, date, tz),
            movement: on_day(&self.movement, date, tz),
            sleep: on_day(&self.sleep, date, tz),
            stress: on_day(&self.stress, date, tz),
        }
    }

    /// The subset of events falling within `[start, end]` inclusive, in `tz`
    ///
    /// An empty range (end before start) yields an empty set.
    pub fn filter_range<Tz: TimeZone>(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        tz: &Tz,
    ) -> EventSet {
        EventSet {
            food: in_range(&self.food, start, end, tz),
            water: in_range(&self.water, start, end, tz),
            cravings: in_range(&self.cravings, start, end, tz),
            movement: in_range(&self.movement, start, end, tz),
            sleep: in_range(&self.sleep, start, end, tz),
            stress: in_range(&self.stress, start, end, tz),
        }
    }
}
