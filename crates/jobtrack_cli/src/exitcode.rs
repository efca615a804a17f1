//! Process exit codes (BSD sysexits.h compatible).

/// Successful termination
pub const OK: i32 = 0;

/// Invalid field value, duplicate email, or delete blocked by dependents
pub const DATAERR: i32 = 65;

/// Referenced record does not exist
pub const NOINPUT: i32 = 66;

/// Storage or internal failure
pub const SOFTWARE: i32 = 70;

/// Writing command output failed
pub const IOERR: i32 = 74;

/// Logging or other configuration error
pub const CONFIG: i32 = 78;
