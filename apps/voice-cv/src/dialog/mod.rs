// Dialog Controller: one question at a time, with skip / repeat / pause commands
// and a spoken yes/no confirmation before a value is accepted.

pub mod commands;
pub mod controller;
pub mod prompts;

pub use controller::{DialogConfig, DialogController};
