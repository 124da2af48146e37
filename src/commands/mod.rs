//! CLI subcommands

pub mod check;
pub mod homepage;
pub mod init;
pub mod list;
