//! Per-stage logging switches for the report pipeline.
//!
//! The cleaner, segmenter, chart renderer and report assembler each declare a
//! private `ENABLE_LOGS` const. The macros below expand to `log::*!` calls
//! wrapped in that check, so one stage can be muted while `RUST_LOG` keeps
//! controlling the rest.
//!
//! Usage:
//! ```ignore
//! // At the top of the stage module:
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_info, log_warn};
//!
//! log_info!("Dropped {} incomplete rows", dropped);
//! log_warn!("Week {} has no data", week);
//! ```

/// `log::info!` when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// `log::warn!` when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// `log::error!` when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
