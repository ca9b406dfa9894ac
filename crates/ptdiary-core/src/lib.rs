//! Service plumbing shared by PT Diary binaries: tracing setup, health
//! probes, request-id middleware and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
