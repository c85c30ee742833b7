//! OS-level helpers: environment snapshots and process execution.

pub mod command_ext;
pub mod env;
