//! Account form state and keyboard navigation

use super::field::FormField;
use super::schema::{FormKind, FormSchema};
use super::validator::FormSnapshot;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Buttons on the last row of every account form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormButton {
    #[default]
    Submit,
    /// Switch to the other form (Sign Up / Back to Login)
    Link,
}

impl FormButton {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Submit => Self::Link,
            Self::Link => Self::Submit,
        }
    }
}

/// A login or registration form: schema plus live field values
#[derive(Debug, Clone)]
pub struct AccountForm {
    pub schema: FormSchema,
    pub fields: Vec<FormField>,
    /// One past the last field is the buttons row
    pub active_field_index: usize,
    pub selected_button: FormButton,
}

impl AccountForm {
    pub fn new(schema: FormSchema) -> Self {
        let fields = schema.fields.clone();
        Self {
            schema,
            fields,
            active_field_index: 0,
            selected_button: FormButton::default(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.schema.kind
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    /// Set a field's value by name. Unknown names are ignored, the field
    /// set is fixed by the schema.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.set_value(value);
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::from_pairs(self.fields.iter().map(|f| (f.name, f.value())))
    }

    pub fn payload(&self) -> serde_json::Value {
        self.schema.payload(&self.fields)
    }

    /// Restore every field to the schema's initial value
    pub fn reset(&mut self) {
        self.fields = self.schema.fields.clone();
        self.active_field_index = 0;
        self.selected_button = FormButton::default();
    }
}

impl Form for AccountForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields + buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        // None on the buttons row
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}
