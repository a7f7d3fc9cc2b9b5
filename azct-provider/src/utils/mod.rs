//! Utility modules.

/// Date/time serialization helpers shared by record types.
pub mod datetime;

/// Log sanitization utilities to prevent secret exposure.
pub mod log_sanitizer;

/// Resource ID and type key helpers.
pub mod resource_id;
