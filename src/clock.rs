//! Injectable time source.
//!
//! Invite consumption stamps and the "is this recipe scheduled today or
//! later" comparison both depend on the current time, so the core takes a
//! [`Clock`] instead of calling `Utc::now()` directly. Tests use a fixed
//! clock from `test_utils`.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current date and time.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
