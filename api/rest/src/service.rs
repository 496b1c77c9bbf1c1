pub mod admin;
pub mod download;
pub mod index;
