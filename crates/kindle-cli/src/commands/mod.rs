//! One module per user-facing action.

pub mod completions;
pub mod generate;
pub mod init;
pub mod presets;
