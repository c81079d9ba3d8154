//! Window + engine loop runtime.
//!
//! Owns the winit event loop, the single engine window, the GPU context and
//! presenter, and the input/clock state. Applications enter through
//! [`Engine::run`] and get called back through the `core::App` hooks.

mod runtime;

pub use runtime::{Engine, EngineConfig};
