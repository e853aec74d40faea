#![forbid(unsafe_code)]

//! Request security context shared by all tenant-scoped Steward modules.

pub mod context;

pub use context::{SecurityContext, SecurityContextBuilder, SecurityError};
