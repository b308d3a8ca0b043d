pub mod admin_roster;

pub use admin_roster::*;
