//! Application state module

mod app_state;
mod controller;
mod forms;

pub use app_state::*;
pub use controller::*;
pub use forms::*;
