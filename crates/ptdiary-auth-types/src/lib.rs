//! Identity types shared across PT Diary services.
//!
//! Authentication happens at the gateway; services only read the identity
//! headers it injects.

pub mod identity;
