//! sea-orm entities for the diary service tables.

pub mod comments;
pub mod diets;
pub mod pt_contracts;
pub mod push_tokens;
