//! Persisted schedule record types
//!
//! Three independent record sets drive the engine: full-day blocks,
//! time-slot blocks, and city-to-date service assignments. Blocks are
//! prohibitive (presence takes a date or window off the calendar);
//! assignments are affirmative (presence means the city is actively
//! served). The two axes are never merged in storage.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{PlanbordError, Result};

/// Which cities a block applies to.
///
/// The legacy wire format encodes "all cities" as an empty city array.
/// That sentinel is easy to confuse with "no cities chosen yet" during
/// input handling, so in the domain it is an explicit variant; the
/// serde impls below keep the wire format byte-compatible (an empty
/// JSON array round-trips to `AllCities` and back).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityScope {
    /// Applies to every city, including ones not known at write time.
    AllCities,
    /// Applies only to the named cities. Never empty.
    Cities(BTreeSet<String>),
}

impl CityScope {
    /// Build a scope from a city collection, normalising the empty
    /// collection to `AllCities` (the legacy sentinel).
    pub fn from_cities<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = cities.into_iter().map(Into::into).collect();
        if set.is_empty() {
            Self::AllCities
        } else {
            Self::Cities(set)
        }
    }

    /// Whether this scope covers the given city.
    pub fn applies_to(&self, city: &str) -> bool {
        match self {
            Self::AllCities => true,
            Self::Cities(set) => set.contains(city),
        }
    }

    /// Whether this scope covers every city.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::AllCities)
    }

    /// The named cities of this scope; empty for `AllCities` (the wire
    /// sentinel shape).
    pub fn city_names(&self) -> Vec<String> {
        match self {
            Self::AllCities => Vec::new(),
            Self::Cities(set) => set.iter().cloned().collect(),
        }
    }

    /// Whether the named cities equal the full configured city universe.
    /// An `AllCities` scope trivially covers the universe.
    pub fn covers_universe(&self, universe: &BTreeSet<String>) -> bool {
        match self {
            Self::AllCities => true,
            Self::Cities(set) => !universe.is_empty() && set == universe,
        }
    }
}

impl Serialize for CityScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::AllCities => serializer.serialize_seq(Some(0))?.end(),
            Self::Cities(set) => {
                let mut seq = serializer.serialize_seq(Some(set.len()))?;
                for city in set {
                    seq.serialize_element(city)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for CityScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ScopeVisitor;

        impl<'de> Visitor<'de> for ScopeVisitor {
            type Value = CityScope;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a city array (empty means all cities)")
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut cities = Vec::new();
                while let Some(city) = seq.next_element::<String>()? {
                    cities.push(city);
                }
                Ok(CityScope::from_cities(cities))
            }
        }

        deserializer.deserialize_seq(ScopeVisitor)
    }
}

/// A whole calendar day (or a set of cities within it) taken off booking.
///
/// Records with `is_full_day == false` exist only to carry time-slot
/// blocking metadata and never block a date on their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateBlock {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "cities")]
    pub scope: CityScope,
    pub reason: Option<String>,
    pub is_full_day: bool,
}

/// A sub-day interval `[start_time, end_time)` taken off booking.
///
/// Multiple slot blocks may coexist on the same date, overlapping or not;
/// the engine never merges or deduplicates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotBlock {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(rename = "cities")]
    pub scope: CityScope,
    pub reason: Option<String>,
}

impl TimeSlotBlock {
    /// Validate the interval invariant `start_time < end_time`.
    pub fn validate(&self) -> Result<()> {
        if self.start_time >= self.end_time {
            return Err(PlanbordError::InvalidInput(format!(
                "time slot block {}: start {} is not before end {}",
                self.id, self.start_time, self.end_time
            )));
        }
        Ok(())
    }
}

/// A city actively serviced on a date (affirmative, not prohibitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    pub id: String,
    pub date: NaiveDate,
    pub city: String,
}

/// Insert shape for a schedule assignment; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScheduleAssignment {
    pub date: NaiveDate,
    pub city: String,
}

/// An inclusive calendar date range. Every store query is expressed as a
/// span; a single date is the degenerate one-day span.
///
/// Deserialization goes through [`DateSpan::new`], so an inverted span
/// cannot be materialized from the wire either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl<'de> Deserialize<'de> for DateSpan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            start: NaiveDate,
            end: NaiveDate,
        }
        let raw = Raw::deserialize(deserializer)?;
        DateSpan::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

impl DateSpan {
    /// Create a span covering `[start, end]`, rejecting inverted ranges.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(PlanbordError::InvalidInput(format!(
                "date span start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Span covering exactly one date.
    pub fn single(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of dates in the span (at least 1).
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether the span contains the given date.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterate the dates of the span in ascending order.
    pub fn iter_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Add/remove delta between a persisted city set and a desired one.
/// The two sides are disjoint by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityDelta {
    pub to_add: Vec<String>,
    pub to_remove: Vec<String>,
}

impl CityDelta {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Cities actually added to and removed from a date after applying a
/// reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDelta {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

/// A date whose bulk-assignment write failed, with the error detail an
/// operator needs to retry just that date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedDate {
    pub date: NaiveDate,
    pub error: String,
}

/// Structured outcome of a bulk range assignment. Per-date writes are
/// independently committed, so a partial failure is a valid, reportable
/// state rather than an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkAssignOutcome {
    pub succeeded_dates: Vec<NaiveDate>,
    pub failed_dates: Vec<FailedDate>,
}

impl BulkAssignOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_dates.is_empty()
    }
}
