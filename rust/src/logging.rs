//! Logging macros for the schedule search with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0).
//! Verbosity levels:
//! - 0: SILENT (only errors)
//! - 1: IMPROVEMENTS (new best schedules, search summary)
//! - 2: PROGRESS (periodic evaluated-permutation counts)
//! - 3: DEBUG (candidate sets, matrix construction, memo sizes)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_IMPROVEMENTS: u8 = 1;
pub const VERBOSITY_PROGRESS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at IMPROVEMENTS level (verbosity >= 1).
///
/// Used for: new best schedule found, final search summary.
#[macro_export]
macro_rules! log_improvements {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_IMPROVEMENTS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at PROGRESS level (verbosity >= 2).
///
/// Used for: periodic progress lines during long searches.
#[macro_export]
macro_rules! log_progress {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PROGRESS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}
