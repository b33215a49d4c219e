//! Order numbers.
//!
//! An order number is `<YYYY-MM-DD>-<sequence>` where the sequence starts at
//! 1 each calendar day and is zero-padded to at least three digits. The
//! sequence comes from an [`OrderCounter`], whose `increment` must be a single
//! atomic operation in the backing store.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;

use crate::error::CoreError;

/// Minimum width of the zero-padded daily sequence.
pub const SEQUENCE_WIDTH: usize = 3;

/// Date format used as the order number prefix.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static ORDER_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})-(\d{3,})$").expect("order number regex is valid")
});

/// Build an order number from a date and a 1-based daily sequence.
pub fn format_order_number(date: NaiveDate, sequence: i64) -> String {
    format!(
        "{}-{:0width$}",
        date.format(DATE_FORMAT),
        sequence,
        width = SEQUENCE_WIDTH
    )
}

/// Split an order number into its date and sequence.
pub fn parse_order_number(order_number: &str) -> Result<(NaiveDate, i64), CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid order number '{order_number}'"));
    let caps = ORDER_NUMBER_RE.captures(order_number).ok_or_else(invalid)?;
    let date = NaiveDate::parse_from_str(&caps[1], DATE_FORMAT).map_err(|_| invalid())?;
    let sequence: i64 = caps[2].parse().map_err(|_| invalid())?;
    if sequence < 1 {
        return Err(invalid());
    }
    Ok((date, sequence))
}

// ---------------------------------------------------------------------------
// Counter backends
// ---------------------------------------------------------------------------

/// A per-date counter store.
///
/// Takes `&mut self` so a backend can hold an open database connection or
/// transaction and number an order inside the same unit of work.
#[async_trait]
pub trait OrderCounter: Send {
    /// Atomically increment the counter for `date` (creating it at 1 if absent)
    /// and return the new value.
    async fn increment(&mut self, date: NaiveDate) -> Result<i64, CoreError>;
}

/// Process-local counter for tests and local development.
///
/// Not durable: counts are lost on restart and are not shared between
/// processes. Production uses the database-backed counter. Clones share
/// the same counts.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderCounter {
    counters: Arc<Mutex<HashMap<NaiveDate, i64>>>,
}

impl MemoryOrderCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderCounter for MemoryOrderCounter {
    async fn increment(&mut self, date: NaiveDate) -> Result<i64, CoreError> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|_| CoreError::Internal("order counter lock poisoned".to_string()))?;
        let value = counters.entry(date).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}

// ---------------------------------------------------------------------------
// Sequencer
// ---------------------------------------------------------------------------

/// Issues order numbers from an [`OrderCounter`].
pub struct OrderSequencer<C> {
    counter: C,
}

impl<C: OrderCounter> OrderSequencer<C> {
    pub fn new(counter: C) -> Self {
        Self { counter }
    }

    /// Generate the next order number for `date`, or for today (UTC) when `None`.
    pub async fn generate(&mut self, date: Option<NaiveDate>) -> Result<String, CoreError> {
        let date = date.unwrap_or_else(|| chrono::Utc::now().date_naive());
        let sequence = self.counter.increment(date).await?;
        Ok(format_order_number(date, sequence))
    }
}
