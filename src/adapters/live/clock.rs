//! Live adapter for the `Clock` port using the system clock.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// System clock returning the real current time.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
