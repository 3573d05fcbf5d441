//! `sitedesk-theme` — tenant branding resolution.
//!
//! Resolves which branding a session should see (fixed operator theme vs. a
//! per-tenant fetch), caches the last good result, degrades along a
//! classified fallback ladder, and derives the shade palette applied to the
//! host's style sink.

pub mod api;
pub mod color;
pub mod http;
pub mod palette;
pub mod resolver;
pub mod sink;
pub mod theme;

pub use api::{ThemeApi, ThemeApiError};
pub use color::HexColor;
pub use http::HttpThemeApi;
pub use palette::Palette;
pub use resolver::{FallbackPolicy, ThemeResolver};
pub use sink::{MemorySink, StyleSink};
pub use theme::{CachedTheme, TenantTheme, default_theme, operator_theme};
