//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types. The
//! runtime translates window-system events into [`InputEvent`]s and applies
//! them to the [`InputState`] it owns; applications only ever query.
//!
//! Single-thread contract: events are applied synchronously from the window
//! event loop, on the same thread that runs application callbacks. There are
//! no concurrent writers, which is why the state uses plain owned collections
//! with no locking. Any port to an environment with multi-threaded event
//! delivery must revisit this before touching the state from another thread.

mod state;
mod types;

pub(crate) mod platform;

pub use state::{InputState, KeyCallback};
pub use types::{InputEvent, Key, KeyAction, MouseButton, MouseButtonState};
