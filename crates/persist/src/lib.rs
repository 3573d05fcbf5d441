//! `sitedesk-persist` — the client's key-value persistence surface.
//!
//! A deliberately small abstraction: string keys to string values,
//! last-write-wins, no transactions. The session store and the theme resolver
//! both read and write here; the key set they own is enumerated in [`keys`].

pub mod keys;
pub mod kv;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
