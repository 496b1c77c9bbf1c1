pub mod multipart;
pub mod signed_cookie;
