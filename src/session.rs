use std::{
    sync::{Mutex, PoisonError},
    time::{Duration, Instant, SystemTime},
};

/// Inactivity after which the next event starts a new session.
pub(crate) const SESSION_TIMEOUT: Duration = Duration::from_secs(60 * 60);

const RANDOM_SPACE: u64 = 100_000_000;

#[derive(Debug)]
struct SessionState {
    id: String,
    last_activity: Instant,
}

/// Rolling session id with inactivity-based rotation.
#[derive(Debug)]
pub(crate) struct SessionTracker {
    state: Mutex<SessionState>,
}

impl SessionTracker {
    pub(crate) fn new() -> Self {
        Self::with_start(Instant::now())
    }

    pub(crate) fn with_start(now: Instant) -> Self {
        SessionTracker {
            state: Mutex::new(SessionState {
                id: new_session_id(),
                last_activity: now,
            }),
        }
    }

    /// Record activity at `now` and return the session id the activity belongs to.
    pub(crate) fn touch(&self, now: Instant) -> String {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if now.saturating_duration_since(state.last_activity) >= SESSION_TIMEOUT {
            state.id = new_session_id();
        }
        state.last_activity = state.last_activity.max(now);
        state.id.clone()
    }
}

/// Seconds since the epoch followed by eight random digits. Sorts by creation second.
pub(crate) fn new_session_id() -> String {
    let epoch_seconds = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let random = rand::random_range(0..RANDOM_SPACE);
    (epoch_seconds * RANDOM_SPACE + random).to_string()
}
