//! Persisted keys owned exclusively by the client core.
//!
//! Logout removes every key in [`OWNED`]; nothing outside this workspace may
//! write to them.

pub const ACCESS_TOKEN: &str = "access_token";
pub const REFRESH_TOKEN: &str = "refresh_token";
pub const USER: &str = "user";
pub const PERMISSIONS: &str = "permissions";
pub const TENANT_THEME: &str = "tenant_theme";
pub const TENANT_ID: &str = "tenant_id";
pub const TENANT_SLUG: &str = "tenant_slug";
pub const USER_ROLE: &str = "user_role";
pub const IS_SUPER_ADMIN: &str = "is_super_admin";

/// Every key this core owns, purged as a set on logout.
pub const OWNED: [&str; 9] = [
    ACCESS_TOKEN,
    REFRESH_TOKEN,
    USER,
    PERMISSIONS,
    TENANT_THEME,
    TENANT_ID,
    TENANT_SLUG,
    USER_ROLE,
    IS_SUPER_ADMIN,
];
