pub mod admin;
pub mod exports;
pub mod graduates;
pub mod guests;
pub mod health;
pub mod storage;
pub(crate) mod upload;
pub mod users;
pub mod verify;
