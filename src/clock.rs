use chrono::{DateTime, Utc};
use mockall::automock;

/// Source of "now". Handlers and the time-delta calculator read time only
/// through this trait so tests can freeze it.
#[automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
