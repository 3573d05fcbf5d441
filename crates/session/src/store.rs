//! The session store: single owner of credential lifecycle and the live
//! session.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use sitedesk_auth::{Role, Session, SessionSnapshot, evaluate};
use sitedesk_events::{EventBus, InMemoryEventBus, SessionEvent, Subscription};
use sitedesk_persist::{KeyValueStore, keys};

use crate::api::{AuthApi, AuthApiError, Profile, UserRecord};

/// Login failure, returned (never panicked) to the UI.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("credentials rejected: {0}")]
    Credentials(String),

    #[error("network failure: {0}")]
    Network(String),
}

/// Refresh is the one loud operation: callers invoke it after mutating
/// server-side state and need to know when it failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefreshError {
    #[error("no live session to refresh")]
    NoSession,

    #[error(transparent)]
    Api(AuthApiError),
}

/// Which login surface to return to after logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginSurface {
    /// Platform operator login.
    Operator,
    /// Tenant-scoped login, addressed by slug when one was known.
    Tenant { slug: Option<String> },
}

/// Owns the live `Session` and the persisted credential state.
///
/// Exactly one store exists per client process; consumers hold it by `Arc`
/// from the composition root, never as a module-level global.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn KeyValueStore>,
    bus: Arc<InMemoryEventBus<SessionEvent>>,
    session: Mutex<Option<Session>>,
}

impl SessionStore {
    pub fn new(
        api: Arc<dyn AuthApi>,
        store: Arc<dyn KeyValueStore>,
        bus: Arc<InMemoryEventBus<SessionEvent>>,
    ) -> Self {
        Self {
            api,
            store,
            bus,
            session: Mutex::new(None),
        }
    }

    /// Subscribe to session lifecycle events.
    pub fn subscribe(&self) -> Subscription<SessionEvent> {
        self.bus.subscribe()
    }

    /// Clone of the live session, if any.
    pub fn current(&self) -> Option<Session> {
        self.lock_session().clone()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.lock_session().as_ref().map(Session::snapshot)
    }

    /// Rehydrate a persisted session at startup. Synchronous — no network.
    ///
    /// Publishes `SessionRestored` so the composition root schedules a theme
    /// resolution pass. No-op (no session, no event) when nothing usable is
    /// persisted.
    pub fn initialize(&self) -> Option<SessionSnapshot> {
        let _token = self.store.get(keys::ACCESS_TOKEN)?;
        let raw_user = self.store.get(keys::USER)?;

        let user: UserRecord = match serde_json::from_str(&raw_user) {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!(error = %e, "persisted user record unreadable; starting logged out");
                return None;
            }
        };

        let permissions = self
            .store
            .get(keys::PERMISSIONS)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default();
        let role = self.store.get(keys::USER_ROLE).unwrap_or_default();
        let is_superuser = self
            .store
            .get(keys::IS_SUPER_ADMIN)
            .map(|v| v == "true")
            .unwrap_or(false);
        let tenant = self
            .store
            .get(keys::TENANT_ID)
            .and_then(|raw| raw.parse().ok());
        let tenant_slug = self.store.get(keys::TENANT_SLUG);

        let session = Session {
            user_id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: Role::new(role),
            is_superuser,
            tenant,
            tenant_slug,
            permissions: permissions.into_iter().collect(),
        };
        let snapshot = session.snapshot();

        *self.lock_session() = Some(session);
        tracing::info!("session rehydrated from persisted credentials");
        self.publish(SessionEvent::SessionRestored(snapshot));

        Some(snapshot)
    }

    /// Authenticate and establish the session.
    ///
    /// On failure no state is committed: the store persists and mutates only
    /// after the API call succeeds.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, LoginError> {
        let response = self.api.login(email, password).await.map_err(|e| match e {
            AuthApiError::Credentials(msg) => LoginError::Credentials(msg),
            AuthApiError::Network(msg) => LoginError::Network(msg),
        })?;

        self.persist("access_token write", keys::ACCESS_TOKEN, &response.access_token);
        self.persist("refresh_token write", keys::REFRESH_TOKEN, &response.refresh_token);
        self.persist_user(&response.user, &response.permissions, &response.role, response.is_super_admin);
        self.persist_tenant(response.tenant_id.as_ref(), response.tenant_slug.as_deref());

        let session = Session {
            user_id: response.user.id,
            email: response.user.email,
            display_name: response.user.display_name,
            role: Role::new(response.role),
            is_superuser: response.is_super_admin,
            tenant: response.tenant_id,
            tenant_slug: response.tenant_slug,
            permissions: response.permissions.into_iter().collect(),
        };
        let snapshot = session.snapshot();

        *self.lock_session() = Some(session.clone());
        tracing::info!(superuser = snapshot.is_superuser, "login succeeded");
        self.publish(SessionEvent::LoggedIn(snapshot));

        Ok(session)
    }

    /// Destroy the session.
    ///
    /// The remote invalidation call is fire-and-forget: it is spawned off
    /// and never awaited, so the local purge runs even when the server hangs
    /// or is unreachable. The returned surface is computed from the persisted
    /// flags *before* the purge.
    pub async fn logout(&self) -> LoginSurface {
        let was_superuser = self
            .store
            .get(keys::IS_SUPER_ADMIN)
            .map(|v| v == "true")
            .unwrap_or(false);
        let slug = self.store.get(keys::TENANT_SLUG);
        let surface = if was_superuser {
            LoginSurface::Operator
        } else {
            LoginSurface::Tenant { slug }
        };

        if let Some(refresh_token) = self.store.get(keys::REFRESH_TOKEN) {
            let api = self.api.clone();
            tokio::spawn(async move {
                if let Err(e) = api.logout(&refresh_token).await {
                    tracing::debug!(error = %e, "remote logout failed");
                }
            });
        }

        for key in keys::OWNED {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove persisted key");
            }
        }

        *self.lock_session() = None;
        tracing::info!("logged out");
        self.publish(SessionEvent::LoggedOut);

        surface
    }

    /// Re-fetch the authoritative profile and replace the session's mutable
    /// fields. Failure propagates — no internal retries.
    pub async fn refresh(&self) -> Result<(), RefreshError> {
        let access_token = self
            .store
            .get(keys::ACCESS_TOKEN)
            .ok_or(RefreshError::NoSession)?;

        let profile = self
            .api
            .profile(&access_token)
            .await
            .map_err(RefreshError::Api)?;

        let snapshot = self.replace_from_profile(&profile)?;
        self.persist_user(&profile.user, &profile.permissions, &profile.role, profile.is_superuser);
        self.persist_tenant(profile.tenant.as_ref(), profile.tenant_slug.as_deref());

        tracing::debug!("profile refreshed");
        self.publish(SessionEvent::ProfileRefreshed(snapshot));
        Ok(())
    }

    // ── Permission evaluation ────────────────────────────────────────────

    pub fn has_permission(&self, code: &str) -> bool {
        evaluate::has_permission(self.lock_session().as_ref(), code)
    }

    pub fn has_any<'a, I>(&self, codes: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        evaluate::has_any(self.lock_session().as_ref(), codes)
    }

    pub fn has_all<'a, I>(&self, codes: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        evaluate::has_all(self.lock_session().as_ref(), codes)
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn replace_from_profile(&self, profile: &Profile) -> Result<SessionSnapshot, RefreshError> {
        let mut guard = self.lock_session();
        let session = guard.as_mut().ok_or(RefreshError::NoSession)?;

        session.user_id = profile.user.id;
        session.email = profile.user.email.clone();
        session.display_name = profile.user.display_name.clone();
        session.role = Role::new(profile.role.clone());
        session.is_superuser = profile.is_superuser;
        session.tenant = profile.tenant;
        session.tenant_slug = profile.tenant_slug.clone();
        session.permissions = profile.permissions.iter().cloned().collect();

        Ok(session.snapshot())
    }

    fn persist_user(&self, user: &UserRecord, permissions: &[String], role: &str, is_superuser: bool) {
        match serde_json::to_string(user) {
            Ok(raw) => self.persist("user write", keys::USER, &raw),
            Err(e) => tracing::warn!(error = %e, "failed to serialize user record"),
        }
        match serde_json::to_string(permissions) {
            Ok(raw) => self.persist("permissions write", keys::PERMISSIONS, &raw),
            Err(e) => tracing::warn!(error = %e, "failed to serialize permissions"),
        }
        self.persist("role write", keys::USER_ROLE, role);
        self.persist(
            "superuser flag write",
            keys::IS_SUPER_ADMIN,
            if is_superuser { "true" } else { "false" },
        );
    }

    fn persist_tenant(&self, tenant: Option<&sitedesk_core::TenantId>, slug: Option<&str>) {
        match tenant {
            Some(tenant) => self.persist("tenant_id write", keys::TENANT_ID, &tenant.to_string()),
            None => self.purge(keys::TENANT_ID),
        }
        match slug {
            Some(slug) => self.persist("tenant_slug write", keys::TENANT_SLUG, slug),
            None => self.purge(keys::TENANT_SLUG),
        }
    }

    fn persist(&self, what: &str, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(key, error = %e, "{what} failed");
        }
    }

    fn purge(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            tracing::warn!(key, error = %e, "failed to remove persisted key");
        }
    }

    fn publish(&self, event: SessionEvent) {
        // A missed notification is recovered by the next trigger; resolver
        // memoization makes the retry cheap.
        if let Err(e) = self.bus.publish(event) {
            tracing::debug!(error = ?e, "failed to publish session event");
        }
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}
