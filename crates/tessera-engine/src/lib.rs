//! Tessera engine crate.
//!
//! A minimal pixel-oriented rendering engine: applications draw into a
//! logical pixel grid via simple primitives, and the engine composites that
//! grid onto a wgpu surface once per frame while reporting input state and
//! frame timing.
//!
//! The whole engine is single-threaded. Input state, the pixel surface, and
//! the frame clock are owned by the event-loop thread for the engine's entire
//! lifetime; see the `input` module docs before introducing any threading.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod surface;
pub mod time;
pub mod window;
