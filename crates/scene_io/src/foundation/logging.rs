//! Logging utilities
//!
//! The library only emits records through `log`; binaries and tests decide
//! whether anything is printed by calling [`init`].

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
