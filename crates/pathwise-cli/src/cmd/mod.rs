pub mod goal;
pub mod init;
pub mod next;
pub mod resolve;
pub mod rules;
pub mod streak;
pub mod ui;
pub mod validate;
