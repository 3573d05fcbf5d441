//! `sitedesk-events` — lightweight pub/sub between the session store and its
//! consumers.
//!
//! The session store publishes `SessionEvent`s; the composition root drains a
//! subscription and re-triggers theme resolution. Neither side holds a
//! reference to the other's mutable state.

pub mod bus;
pub mod in_memory_bus;
pub mod session_event;

pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use session_event::SessionEvent;
