//! Process runner implementations.

pub mod pty;
pub mod scripted;

pub use pty::{PtyConfig, PtyProcessRunner};
pub use scripted::ScriptedRunner;
