use chrono::{DateTime, Local, Utc};

/// Format used for the report's Time column.
pub const SNAPSHOT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the snapshot instant, injectable so reports are reproducible in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Render a snapshot instant in the machine's local time zone.
pub fn format_local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format(SNAPSHOT_TIME_FORMAT)
        .to_string()
}
