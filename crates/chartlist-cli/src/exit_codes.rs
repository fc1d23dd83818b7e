//! Standard exit codes for the collectors
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// Configuration error - required setting missing
pub const CONFIG_ERROR: i32 = 2;

/// Version error - chart version could not be resolved
pub const VERSION_ERROR: i32 = 3;

/// Chart error - malformed Chart.yaml
pub const CHART_ERROR: i32 = 4;

/// IO error - charts directory missing, output not writable, etc.
pub const IO_ERROR: i32 = 5;

/// Usage error - unknown flag or bad argument (EX_USAGE)
pub const USAGE_ERROR: i32 = 64;
