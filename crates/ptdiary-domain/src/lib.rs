//! Domain types shared across PT Diary crates.
//!
//! Pure types only, no framework dependencies. Import in `usecase/` and
//! `domain/` layers; never in `infra/`.

pub mod notification;
pub mod pagination;
pub mod user;
