//! Desk clock: the single source of "today" and "now".
//!
//! Generation of due dates, the analytics month window and history
//! timestamps all read through here so tests can pin the calendar.

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeskClock {
    /// Wall clock.
    #[default]
    System,
    /// Frozen at one instant.
    Fixed(DateTime<Utc>),
}

impl DeskClock {
    /// A clock frozen at midnight UTC of `date`.
    pub fn fixed_on(date: NaiveDate) -> Self {
        Self::Fixed(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(at) => *at,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
