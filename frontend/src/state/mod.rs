pub mod auth;
pub mod firebase;
pub mod session;
