//! End-to-end flows through the composed client core: login, rehydration,
//! refresh, logout, and the theme fallback ladder.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use sitedesk_client::ClientCore;
use sitedesk_core::{TenantId, UserId};
use sitedesk_persist::{KeyValueStore, MemoryStore, keys};
use sitedesk_session::{AuthApi, AuthApiError, LoginResponse, Profile, UserRecord};
use sitedesk_theme::{
    CachedTheme, HexColor, MemorySink, TenantTheme, ThemeApi, ThemeApiError, default_theme,
    operator_theme, sink::vars,
};

#[derive(Default)]
struct MockAuthApi {
    login_response: Option<LoginResponse>,
    logout_error: Option<AuthApiError>,
    profile: Option<Profile>,
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse, AuthApiError> {
        self.login_response
            .clone()
            .ok_or_else(|| AuthApiError::Credentials("unknown user".to_string()))
    }

    async fn logout(&self, _refresh_token: &str) -> Result<(), AuthApiError> {
        match &self.logout_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn profile(&self, _access_token: &str) -> Result<Profile, AuthApiError> {
        self.profile
            .clone()
            .ok_or_else(|| AuthApiError::Network("profile not scripted".to_string()))
    }
}

/// Theme API replaying a scripted sequence of outcomes.
struct MockThemeApi {
    outcomes: Mutex<VecDeque<Result<TenantTheme, ThemeApiError>>>,
    calls: AtomicUsize,
}

impl MockThemeApi {
    fn scripted(outcomes: Vec<Result<TenantTheme, ThemeApiError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThemeApi for MockThemeApi {
    async fn current_tenant_theme(&self, _token: &str) -> Result<TenantTheme, ThemeApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ThemeApiError::Infrastructure(
                "script exhausted".to_string(),
            )))
    }
}

fn login_response(tenant: Option<TenantId>, superuser: bool) -> LoginResponse {
    LoginResponse {
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
        user: UserRecord {
            id: UserId::new(),
            email: "pm@acme-build.test".to_string(),
            display_name: "Site PM".to_string(),
        },
        role: (if superuser { "superadmin" } else { "project_manager" }).to_string(),
        permissions: vec!["projects.read".to_string()],
        tenant_id: tenant,
        tenant_slug: tenant.map(|_| "acme-build".to_string()),
        is_super_admin: superuser,
    }
}

fn branded(tenant: TenantId, primary: &str) -> TenantTheme {
    TenantTheme {
        tenant_id: Some(tenant),
        company_name: "Acme Build Co".to_string(),
        logo_url: None,
        primary_color: primary.parse().unwrap(),
        secondary_color: "#445566".parse().unwrap(),
    }
}

fn core_with(
    auth: MockAuthApi,
    theme: Arc<MockThemeApi>,
) -> (ClientCore, Arc<MemoryStore>, Arc<MemorySink>) {
    let store = Arc::new(MemoryStore::new());
    let sink = Arc::new(MemorySink::new());
    let core = ClientCore::new(Arc::new(auth), theme, store.clone(), sink.clone());
    (core, store, sink)
}

#[tokio::test]
async fn tenant_login_applies_the_fetched_theme() {
    let tenant = TenantId::new();
    let theme_api = MockThemeApi::scripted(vec![Ok(branded(tenant, "#112233"))]);
    let auth = MockAuthApi {
        login_response: Some(login_response(Some(tenant), false)),
        ..MockAuthApi::default()
    };
    let (core, store, sink) = core_with(auth, theme_api.clone());

    core.login("pm@acme-build.test", "hunter2").await.unwrap();

    assert_eq!(theme_api.calls(), 1);
    let expected_hover = "#112233".parse::<HexColor>().unwrap().shade(-20);
    assert_eq!(sink.get(vars::PRIMARY), Some("#112233".to_string()));
    assert_eq!(sink.get(vars::PRIMARY_HOVER), Some(expected_hover.to_string()));
    assert!(store.get(keys::TENANT_THEME).is_some());
}

#[tokio::test]
async fn superuser_login_uses_the_operator_theme_without_fetching() {
    let theme_api = MockThemeApi::scripted(vec![]);
    let auth = MockAuthApi {
        login_response: Some(login_response(None, true)),
        ..MockAuthApi::default()
    };
    let (core, _store, sink) = core_with(auth, theme_api.clone());

    core.login("ops@sitedesk.test", "hunter2").await.unwrap();

    assert_eq!(theme_api.calls(), 0);
    let operator_primary = operator_theme().primary_color.to_string();
    assert_eq!(sink.get(vars::PRIMARY), Some(operator_primary));
}

#[tokio::test]
async fn logout_purges_keys_and_reverts_the_sink_despite_remote_failure() {
    let tenant = TenantId::new();
    let theme_api = MockThemeApi::scripted(vec![Ok(branded(tenant, "#112233"))]);
    let auth = MockAuthApi {
        login_response: Some(login_response(Some(tenant), false)),
        logout_error: Some(AuthApiError::Network("timed out".to_string())),
        ..MockAuthApi::default()
    };
    let (core, store, sink) = core_with(auth, theme_api);

    core.login("pm@acme-build.test", "hunter2").await.unwrap();
    assert!(!sink.is_empty());

    core.logout().await;

    for key in keys::OWNED {
        assert_eq!(store.get(key), None, "key {key} survived logout");
    }
    assert!(sink.is_empty());
    assert_eq!(core.resolver().current(), None);
}

#[tokio::test]
async fn unauthenticated_theme_fetch_leaves_the_session_unthemed() {
    let tenant = TenantId::new();
    let theme_api = MockThemeApi::scripted(vec![Err(ThemeApiError::Unauthenticated)]);
    let auth = MockAuthApi {
        login_response: Some(login_response(Some(tenant), false)),
        ..MockAuthApi::default()
    };
    let (core, _store, sink) = core_with(auth, theme_api);

    core.login("pm@acme-build.test", "hunter2").await.unwrap();

    assert_eq!(core.resolver().current(), None);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn unbranded_tenant_with_cache_gets_the_cached_theme_verbatim() {
    let tenant = TenantId::new();
    let cached = branded(tenant, "#0a0b0c");
    let theme_api = MockThemeApi::scripted(vec![Err(ThemeApiError::NotConfigured)]);
    let auth = MockAuthApi {
        login_response: Some(login_response(Some(tenant), false)),
        ..MockAuthApi::default()
    };
    let (core, store, sink) = core_with(auth, theme_api);
    store
        .set(
            keys::TENANT_THEME,
            &serde_json::to_string(&CachedTheme::now(cached.clone())).unwrap(),
        )
        .unwrap();

    core.login("pm@acme-build.test", "hunter2").await.unwrap();

    assert_eq!(core.resolver().current(), Some(cached));
    // The cached branding, not the generic infrastructure default.
    assert_eq!(sink.get(vars::PRIMARY), Some("#0a0b0c".to_string()));
    assert_ne!(
        sink.get(vars::PRIMARY),
        Some(default_theme().primary_color.to_string())
    );
}

#[tokio::test]
async fn bootstrap_rehydrates_and_falls_back_to_the_default_on_outage() {
    let tenant = TenantId::new();

    // First run: a normal login persists everything, then the process ends.
    let theme_api = MockThemeApi::scripted(vec![Ok(branded(tenant, "#112233"))]);
    let auth = MockAuthApi {
        login_response: Some(login_response(Some(tenant), false)),
        ..MockAuthApi::default()
    };
    let (core, store, _sink) = core_with(auth, theme_api);
    core.login("pm@acme-build.test", "hunter2").await.unwrap();
    drop(core);
    // The cache from the first run would shadow the default-theme path.
    store.remove(keys::TENANT_THEME).unwrap();

    // Second run: backend down, rehydration still brands the client.
    let offline_theme = MockThemeApi::scripted(vec![Err(ThemeApiError::Infrastructure(
        "connection refused".to_string(),
    ))]);
    let sink = Arc::new(MemorySink::new());
    let core = ClientCore::new(
        Arc::new(MockAuthApi::default()),
        offline_theme,
        store,
        sink.clone(),
    );
    core.bootstrap().await;

    assert!(core.session().current().is_some());
    assert_eq!(core.resolver().current(), Some(default_theme()));
    assert_eq!(
        sink.get(vars::PRIMARY),
        Some(default_theme().primary_color.to_string())
    );
}

#[tokio::test]
async fn refresh_moves_branding_to_the_confirmed_tenant() {
    let tenant_a = TenantId::new();
    let tenant_b = TenantId::new();
    let theme_api = MockThemeApi::scripted(vec![
        Ok(branded(tenant_a, "#112233")),
        Ok(branded(tenant_b, "#aa0000")),
    ]);
    let auth = MockAuthApi {
        login_response: Some(login_response(Some(tenant_a), false)),
        profile: Some(Profile {
            user: UserRecord {
                id: UserId::new(),
                email: "pm@acme-build.test".to_string(),
                display_name: "Site PM".to_string(),
            },
            role: "project_manager".to_string(),
            permissions: vec!["projects.read".to_string()],
            tenant: Some(tenant_b),
            tenant_slug: Some("northside-construction".to_string()),
            onboarding_completed: true,
            is_superuser: false,
        }),
        ..MockAuthApi::default()
    };
    let (core, _store, sink) = core_with(auth, theme_api.clone());

    core.login("pm@acme-build.test", "hunter2").await.unwrap();
    assert_eq!(sink.get(vars::PRIMARY), Some("#112233".to_string()));

    core.refresh().await.unwrap();

    assert_eq!(theme_api.calls(), 2);
    assert_eq!(sink.get(vars::PRIMARY), Some("#aa0000".to_string()));
    assert_eq!(
        core.resolver().current().and_then(|t| t.tenant_id),
        Some(tenant_b)
    );
}
