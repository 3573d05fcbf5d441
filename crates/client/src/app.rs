//! Client core wiring: session store, event subscription, theme resolver.

use std::sync::Arc;

use sitedesk_auth::Session;
use sitedesk_events::{InMemoryEventBus, SessionEvent, Subscription};
use sitedesk_persist::KeyValueStore;
use sitedesk_session::{AuthApi, HttpAuthApi, LoginError, LoginSurface, RefreshError, SessionStore};
use sitedesk_theme::{FallbackPolicy, HttpThemeApi, StyleSink, ThemeApi, ThemeResolver};

/// The client core, owned by the host's composition root.
///
/// Single consumer of the session event stream: each event maps to exactly
/// one resolver action, with the fallback policy fixed per trigger site.
pub struct ClientCore {
    session: Arc<SessionStore>,
    resolver: Arc<ThemeResolver>,
    events: Subscription<SessionEvent>,
}

impl ClientCore {
    /// Wire a core from its collaborators. The subscription is taken here,
    /// before any operation can publish, so no event is ever missed.
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        theme_api: Arc<dyn ThemeApi>,
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn StyleSink>,
    ) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let session = Arc::new(SessionStore::new(auth_api, store.clone(), bus));
        let resolver = Arc::new(ThemeResolver::new(theme_api, store, sink));
        let events = session.subscribe();

        Self {
            session,
            resolver,
            events,
        }
    }

    /// Wire a core against the real backend at `api_url`.
    pub fn connect(
        api_url: impl Into<String>,
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn StyleSink>,
    ) -> Self {
        sitedesk_observability::init();

        let api_url = api_url.into();
        let client = reqwest::Client::new();
        Self::new(
            Arc::new(HttpAuthApi::new(client.clone(), api_url.clone())),
            Arc::new(HttpThemeApi::new(client, api_url)),
            store,
            sink,
        )
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn resolver(&self) -> &Arc<ThemeResolver> {
        &self.resolver
    }

    /// Application start: rehydrate a persisted session and run the theme
    /// pass it schedules. No network is touched when nothing is persisted.
    pub async fn bootstrap(&self) {
        if self.session.initialize().is_some() {
            tracing::debug!("bootstrap restored a persisted session");
        }
        self.pump().await;
    }

    /// Drain pending session events into resolver actions.
    ///
    /// Cooperative: the host calls this between UI turns (and the login /
    /// logout / refresh wrappers call it themselves).
    pub async fn pump(&self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle(event).await;
        }
    }

    async fn handle(&self, event: SessionEvent) {
        match event {
            // Startup and login want branding immediately, even off the cache.
            SessionEvent::LoggedIn(snapshot) | SessionEvent::SessionRestored(snapshot) => {
                self.resolver
                    .resolve(snapshot, FallbackPolicy::AllowCachedFallback)
                    .await;
            }
            // Refresh just proved the server reachable; a silent stand-in
            // would mask a real regression.
            SessionEvent::ProfileRefreshed(snapshot) => {
                self.resolver.resolve(snapshot, FallbackPolicy::Strict).await;
            }
            SessionEvent::LoggedOut => self.resolver.clear(),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, LoginError> {
        let result = self.session.login(email, password).await;
        self.pump().await;
        result
    }

    pub async fn logout(&self) -> LoginSurface {
        let surface = self.session.logout().await;
        self.pump().await;
        surface
    }

    pub async fn refresh(&self) -> Result<(), RefreshError> {
        self.session.refresh().await?;
        self.pump().await;
        Ok(())
    }
}
