//! Logging utilities.
//!
//! Centralizes logger initialization. The engine itself only depends on the
//! `log` facade; this module wires up `env_logger` for binaries that want a
//! ready-made backend.

mod init;

pub use init::{LoggingConfig, init_logging};
