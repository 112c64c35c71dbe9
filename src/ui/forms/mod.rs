//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `account_form`: Login and register forms

mod account_form;
mod field_renderer;

pub use account_form::draw as draw_account_form;
