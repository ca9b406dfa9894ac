pub mod comment;
pub mod diet;
pub mod notification;
pub mod pt_contract;
pub mod push_token;
