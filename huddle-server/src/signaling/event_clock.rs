use chrono::Utc;

/// Server-side timestamps in milliseconds since the Unix epoch.
///
/// Never goes backwards, so events stamped in processing order also sort in
/// that order even if the wall clock is stepped back.
#[derive(Debug, Default)]
pub struct EventClock {
    last: u64,
}

impl EventClock {
    pub fn now(&mut self) -> u64 {
        let wall = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.last = self.last.max(wall);
        self.last
    }
}
