//! leadform CLI library - command implementations behind the `leadform` binary.

pub mod cli;
pub mod fields;
pub mod fill;
pub mod init;
pub mod record;
pub mod show;
pub mod table;
pub mod validate;

pub use cli::{Cli, Commands};
