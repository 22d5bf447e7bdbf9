// Time source used for record timestamps and lead-time checks

use chrono::{DateTime, Local, NaiveDate, Utc};

pub trait Clock: Send + Sync {
    /// Instant used for `createdAt` on stored records.
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day lead-time rules are measured from.
    fn today(&self) -> NaiveDate;
}

/// Reads the system clock; `today` follows the local calendar day boundary.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Frozen clock for deterministic tests.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
    pub today: NaiveDate,
}

#[cfg(test)]
impl FixedClock {
    pub fn on(today: NaiveDate) -> Self {
        let now = today
            .and_hms_opt(9, 30, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now);
        Self { now, today }
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
