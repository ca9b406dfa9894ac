//! Test utilities for PT Diary services.
//!
//! Import from `[dev-dependencies]` only, never in production code.

pub mod auth;
