//! Logging setup.
//!
//! The library itself only talks to the `log` facade. `init_logging` is a
//! convenience for binaries that want the usual `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
