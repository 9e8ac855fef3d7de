use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

use crate::models::OtpPurpose;

use super::OtpVerification;

/// How long an unfinished verification is kept before it is evicted.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(15 * 60);

/// One hosted verification widget plus what its callbacks have recorded.
pub struct OtpSession {
    pub purpose: OtpPurpose,
    pub widget: tokio::sync::Mutex<OtpVerification>,
    opened_at: Instant,
    continued: Arc<AtomicBool>,
    went_back: Arc<AtomicBool>,
    closed: AtomicBool,
}

impl OtpSession {
    pub fn continued(&self) -> bool {
        self.continued.load(Ordering::SeqCst)
    }

    pub fn went_back(&self) -> bool {
        self.went_back.load(Ordering::SeqCst)
    }

    /// Set once the session has been torn down. Operations that were
    /// already in flight check this before acting on their result.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.opened_at) >= ttl
    }

    fn teardown(&self, id: &Uuid) {
        self.closed.store(true, Ordering::SeqCst);
        match self.widget.try_lock() {
            Ok(mut widget) => widget.dispose(),
            // still busy; the timer stops when the last handle drops
            Err(_) => tracing::debug!(session = %id, "closing busy OTP session"),
        }
    }
}

/// Live verification widgets keyed by session id. Sessions the client
/// abandons are evicted once they are older than the ttl.
pub struct OtpSessions {
    sessions: Mutex<HashMap<Uuid, Arc<OtpSession>>>,
    ttl: Duration,
}

impl Default for OtpSessions {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl OtpSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Hosts a widget, wiring its continue and back actions to flags the
    /// account flows read later. Expired sessions are swept first.
    pub fn open(&self, purpose: OtpPurpose, widget: OtpVerification) -> Uuid {
        self.evict_expired();

        let id = Uuid::new_v4();
        let continued = Arc::new(AtomicBool::new(false));
        let went_back = Arc::new(AtomicBool::new(false));

        let on_continue = Arc::clone(&continued);
        let on_back = Arc::clone(&went_back);
        let widget = widget
            .on_continue(move || on_continue.store(true, Ordering::SeqCst))
            .on_back(move || on_back.store(true, Ordering::SeqCst));

        let session = Arc::new(OtpSession {
            purpose,
            widget: tokio::sync::Mutex::new(widget),
            opened_at: Instant::now(),
            continued,
            went_back,
            closed: AtomicBool::new(false),
        });

        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.insert(id, session);
        tracing::info!(session = %id, purpose = purpose.as_str(), "OTP session opened");
        id
    }

    /// An open, unexpired session.
    pub fn get(&self, id: &Uuid) -> Option<Arc<OtpSession>> {
        let session = {
            let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
            sessions.get(id).cloned()?
        };
        if session.is_expired(self.ttl, Instant::now()) {
            self.close(id);
            return None;
        }
        Some(session)
    }

    /// Removes the session and stops its timer. Returns false if it was
    /// not open.
    pub fn close(&self, id: &Uuid) -> bool {
        let removed = {
            let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
            sessions.remove(id)
        };
        let Some(session) = removed else {
            return false;
        };

        session.teardown(id);
        tracing::info!(session = %id, "OTP session closed");
        true
    }

    /// Drops every session older than the ttl. Returns how many went.
    pub fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<(Uuid, Arc<OtpSession>)> = {
            let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
            let ids: Vec<Uuid> = sessions
                .iter()
                .filter(|(_, s)| s.is_expired(self.ttl, now))
                .map(|(id, _)| *id)
                .collect();
            ids.into_iter()
                .filter_map(|id| sessions.remove(&id).map(|s| (id, s)))
                .collect()
        };

        for (id, session) in &expired {
            session.teardown(id);
        }
        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "evicted expired OTP sessions");
        }
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
