//! Foundation module - Core utilities and types
//!
//! - Math types and transform composition
//! - Logging utilities

pub mod math;
pub mod logging;
