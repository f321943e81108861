//! Data models
//!
//! Wire shapes shared between the UI state and backend payloads.
//! IDs coming from the backend are `i64`, permission ids are `u32`.

pub mod company_access;
pub mod permission;
pub mod role;

// Re-exports
pub use company_access::*;
pub use permission::*;
pub use role::*;
