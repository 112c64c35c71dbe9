//! Form domain layer
//!
//! Field values, declarative rules, validation and the two account form
//! schemas.

mod field;
mod form_state;
mod rules;
mod schema;
mod validator;

pub use field::FormField;
pub use form_state::{AccountForm, Form, FormButton};
pub use schema::{FormKind, FormSchema};
pub use validator::{ErrorMap, FormValidator};
