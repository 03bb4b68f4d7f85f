//! External tool adapters.

mod process;
mod scripted;

pub use process::ProcessToolRunner;
pub use scripted::ScriptedToolRunner;
