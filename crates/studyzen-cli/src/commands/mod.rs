pub mod account;
pub mod achievements;
pub mod community;
pub mod config;
pub mod notify;
pub mod session;
pub mod stats;
pub mod timer;
