//! CLI command implementations.

pub mod configure;
pub mod detect;
pub mod init;
pub mod platform;
