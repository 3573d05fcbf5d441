use serde::{Deserialize, Serialize};

use sitedesk_auth::SessionSnapshot;

/// Session lifecycle notifications published by the session store.
///
/// Every variant that establishes or changes tenant context carries the
/// snapshot captured at publish time; consumers act on the snapshot, never on
/// a later read of mutable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A fresh login established a session.
    LoggedIn(SessionSnapshot),

    /// A persisted session was rehydrated at startup (no network involved).
    SessionRestored(SessionSnapshot),

    /// `refresh()` replaced the session's mutable fields; the tenant context
    /// in the snapshot is freshly confirmed by the server.
    ProfileRefreshed(SessionSnapshot),

    /// The session was destroyed.
    LoggedOut,
}

impl SessionEvent {
    /// The snapshot carried by the event, if the session still exists.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        match self {
            SessionEvent::LoggedIn(s)
            | SessionEvent::SessionRestored(s)
            | SessionEvent::ProfileRefreshed(s) => Some(*s),
            SessionEvent::LoggedOut => None,
        }
    }
}
