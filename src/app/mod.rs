//! Application state and core logic

pub mod screen;
pub mod state;

pub use screen::{Prompt, Screen, SetupFocus, SetupForm, SetupRow};
pub use state::{App, Input};
