//! Theme resolution with memoization, fallback classification, and soft
//! cancellation.

use std::sync::{Arc, Mutex};

use sitedesk_auth::SessionSnapshot;
use sitedesk_core::TenantId;
use sitedesk_persist::{KeyValueStore, keys};

use crate::api::{ThemeApi, ThemeApiError};
use crate::palette::Palette;
use crate::sink::{StyleSink, vars};
use crate::theme::{CachedTheme, TenantTheme, default_theme, operator_theme};

/// Fallback behavior when a live fetch cannot produce a theme.
///
/// Passed explicitly per call site; never inferred.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// No substitution: an unreachable or unbranded tenant stays unthemed.
    Strict,
    /// Reuse a same-tenant cache entry; on infrastructure failure only, fall
    /// through to the generic default theme.
    AllowCachedFallback,
}

#[derive(Debug, Default)]
struct ResolverState {
    /// Tenant of the most recently started resolution. In-flight resolutions
    /// compare their captured snapshot against this at completion and discard
    /// themselves on mismatch.
    active_tenant: Option<TenantId>,
    theme: Option<TenantTheme>,
}

/// Resolves and owns the current tenant branding.
///
/// Exactly one resolver exists per client; it is the only writer of the
/// style sink's color variables and of the persisted theme cache entry.
pub struct ThemeResolver {
    api: Arc<dyn ThemeApi>,
    store: Arc<dyn KeyValueStore>,
    sink: Arc<dyn StyleSink>,
    state: Mutex<ResolverState>,
}

impl ThemeResolver {
    pub fn new(
        api: Arc<dyn ThemeApi>,
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn StyleSink>,
    ) -> Self {
        Self {
            api,
            store,
            sink,
            state: Mutex::new(ResolverState::default()),
        }
    }

    /// The currently held theme, if any.
    pub fn current(&self) -> Option<TenantTheme> {
        self.state.lock().ok()?.theme.clone()
    }

    /// Resolve branding for the given session snapshot.
    ///
    /// Never panics and never returns an error; every failure classifies into
    /// a defined fallback outcome. Returns the theme that ended up applied,
    /// or `None` when the session stays unthemed (or the resolution was
    /// superseded by a tenant switch while in flight).
    pub async fn resolve(
        &self,
        snapshot: SessionSnapshot,
        policy: FallbackPolicy,
    ) -> Option<TenantTheme> {
        if snapshot.is_superuser {
            return Some(self.apply_operator_theme());
        }

        let tenant = snapshot.tenant?;

        {
            let mut state = self.lock_state();
            if let Some(held) = &state.theme {
                if held.tenant_id == Some(tenant) {
                    // Memoized: two independent trigger sites (startup
                    // rehydration and reactive tenant change) coalesce here.
                    return Some(held.clone());
                }
                // A held theme from another tenant must not survive the
                // switch, whatever the fetch below ends up doing.
                state.theme = None;
            }
            state.active_tenant = Some(tenant);
        }

        let access_token = self.store.get(keys::ACCESS_TOKEN).unwrap_or_default();
        let outcome = self.api.current_tenant_theme(&access_token).await;

        {
            let state = self.lock_state();
            if state.active_tenant != Some(tenant) {
                tracing::debug!(%tenant, "discarding theme resolution superseded by tenant switch");
                return None;
            }
        }

        match outcome {
            Ok(mut theme) => {
                match theme.tenant_id {
                    Some(returned) if returned != tenant => {
                        // Applying it would brand one tenant's session with
                        // another tenant's identity.
                        tracing::warn!(%tenant, %returned, "theme API returned branding for a different tenant; ignoring");
                        return None;
                    }
                    Some(_) => {}
                    None => theme.tenant_id = Some(tenant),
                }

                self.persist_cache(&theme);
                self.hold_and_apply(theme.clone());
                Some(theme)
            }
            Err(ThemeApiError::Unauthenticated) => {
                // Expected pre-login state; deliberately not an error.
                tracing::debug!(%tenant, "theme fetch before authentication");
                self.fallback_from_cache(tenant, policy)
            }
            Err(ThemeApiError::NotConfigured) => {
                tracing::debug!(%tenant, "tenant has no theme configured");
                self.fallback_from_cache(tenant, policy)
            }
            Err(ThemeApiError::Infrastructure(reason)) => {
                tracing::warn!(%tenant, %reason, "theme fetch failed");
                match policy {
                    FallbackPolicy::Strict => None,
                    FallbackPolicy::AllowCachedFallback => {
                        let theme = self
                            .cached_for(tenant)
                            .unwrap_or_else(default_theme);
                        self.hold_and_apply(theme.clone());
                        Some(theme)
                    }
                }
            }
        }
    }

    /// Revert to unbranded: forget the held theme and remove every owned
    /// style variable. Persisted keys are the session store's to purge.
    pub fn clear(&self) {
        let mut state = self.lock_state();
        state.theme = None;
        state.active_tenant = None;
        drop(state);

        for name in vars::ALL {
            self.sink.remove_var(name);
        }
    }

    fn apply_operator_theme(&self) -> TenantTheme {
        // Operator sessions carry no tenant context; stale tenant branding
        // and identifiers are purged outright.
        for key in [keys::TENANT_THEME, keys::TENANT_ID, keys::TENANT_SLUG] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to purge tenant key");
            }
        }

        let theme = operator_theme();
        let mut state = self.lock_state();
        state.theme = None;
        state.active_tenant = None;
        drop(state);

        self.apply(&theme);
        theme
    }

    /// Cache ladder shared by the 401 and 403/404 branches: a same-tenant
    /// cache entry is reused verbatim, never elevated to the generic default.
    fn fallback_from_cache(
        &self,
        tenant: TenantId,
        policy: FallbackPolicy,
    ) -> Option<TenantTheme> {
        if policy == FallbackPolicy::Strict {
            return None;
        }
        let theme = self.cached_for(tenant)?;
        self.hold_and_apply(theme.clone());
        Some(theme)
    }

    fn cached_for(&self, tenant: TenantId) -> Option<TenantTheme> {
        let raw = self.store.get(keys::TENANT_THEME)?;
        let cached: CachedTheme = serde_json::from_str(&raw)
            .map_err(|e| tracing::warn!(error = %e, "persisted theme cache unreadable"))
            .ok()?;
        // A cache entry for another tenant is as good as no entry.
        (cached.theme.tenant_id == Some(tenant)).then_some(cached.theme)
    }

    fn persist_cache(&self, theme: &TenantTheme) {
        match serde_json::to_string(&CachedTheme::now(theme.clone())) {
            Ok(raw) => {
                if let Err(e) = self.store.set(keys::TENANT_THEME, &raw) {
                    tracing::warn!(error = %e, "failed to persist theme cache");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize theme cache"),
        }
    }

    fn hold_and_apply(&self, theme: TenantTheme) {
        let mut state = self.lock_state();
        state.theme = Some(theme.clone());
        drop(state);
        self.apply(&theme);
    }

    fn apply(&self, theme: &TenantTheme) {
        let primary = Palette::derive(theme.primary_color);
        let secondary = Palette::derive(theme.secondary_color);

        self.sink.set_var(vars::PRIMARY, &primary.base.to_string());
        self.sink.set_var(vars::PRIMARY_HOVER, &primary.hover.to_string());
        self.sink.set_var(vars::PRIMARY_ACTIVE, &primary.active.to_string());
        self.sink.set_var(vars::PRIMARY_LIGHT, &primary.light.to_string());
        self.sink.set_var(vars::SECONDARY, &secondary.base.to_string());
        self.sink.set_var(vars::SECONDARY_HOVER, &secondary.hover.to_string());

        tracing::debug!(company = %theme.company_name, "applied theme");
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ResolverState> {
        // Resolver state is never held across an await; poisoning can only
        // come from a panic in this module, which has none.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
