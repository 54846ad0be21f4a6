pub mod config;
pub mod goals;
pub mod resolve;
pub mod rules;
pub mod streak;
