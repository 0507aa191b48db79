//! CLI subcommands.

pub mod build;
pub mod check;
pub mod dev;
pub mod init;
pub mod serve;
pub mod tree;
