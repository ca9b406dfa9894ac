pub mod db;
pub mod fcm;
pub mod push;
pub mod storage;
