//! Form field value objects

/// How a field accepts and displays input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Free text
    Text(String),
    /// Free text rendered masked
    Secret(String),
    /// Digits only, sent to the server as a JSON number
    Number(String),
    /// One of a fixed set of options, `None` until the user picks one
    Choice {
        options: &'static [&'static str],
        selected: Option<usize>,
    },
}

impl Default for FieldInput {
    fn default() -> Self {
        FieldInput::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
    /// Shown with a `*` marker next to the label
    pub mandatory: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: FieldInput::Text(String::new()),
            mandatory: false,
        }
    }

    /// Create a new masked text field
    pub fn secret(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: FieldInput::Secret(String::new()),
            mandatory: false,
        }
    }

    /// Create a new numeric field
    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: FieldInput::Number(String::new()),
            mandatory: false,
        }
    }

    /// Create a new choice field with nothing selected
    pub fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            input: FieldInput::Choice {
                options,
                selected: None,
            },
            mandatory: false,
        }
    }

    /// Preselect a choice option by value (ignored for other inputs)
    pub fn preselect(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    /// Raw string value as submitted to the validator
    pub fn value(&self) -> &str {
        match &self.input {
            FieldInput::Text(s) | FieldInput::Secret(s) | FieldInput::Number(s) => s,
            FieldInput::Choice { options, selected } => {
                selected.and_then(|i| options.get(i).copied()).unwrap_or("")
            }
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.input, FieldInput::Number(_))
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.input, FieldInput::Choice { .. })
    }

    /// Replace the value wholesale.
    ///
    /// For choice fields the value must match one of the options exactly,
    /// anything else clears the selection.
    pub fn set_value(&mut self, value: &str) {
        match &mut self.input {
            FieldInput::Text(s) | FieldInput::Secret(s) | FieldInput::Number(s) => {
                *s = value.to_string();
            }
            FieldInput::Choice { options, selected } => {
                *selected = options.iter().position(|o| *o == value);
            }
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.input {
            FieldInput::Text(s) | FieldInput::Secret(s) => s.push(c),
            FieldInput::Number(s) => {
                if c.is_ascii_digit() {
                    s.push(c);
                }
            }
            FieldInput::Choice { .. } => {
                // Choice fields are driven by next_option/prev_option
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.input {
            FieldInput::Text(s) | FieldInput::Secret(s) | FieldInput::Number(s) => {
                s.pop();
            }
            FieldInput::Choice { selected, .. } => *selected = None,
        }
    }

    /// Select the next option (wraps around, starts at the first option)
    pub fn next_option(&mut self) {
        if let FieldInput::Choice { options, selected } = &mut self.input {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                None => 0,
                Some(i) => (i + 1) % options.len(),
            });
        }
    }

    /// Select the previous option (wraps around, starts at the last option)
    pub fn prev_option(&mut self) {
        if let FieldInput::Choice { options, selected } = &mut self.input {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                None | Some(0) => options.len() - 1,
                Some(i) => i - 1,
            });
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.input {
            FieldInput::Text(s) | FieldInput::Number(s) => s.clone(),
            FieldInput::Secret(s) => "•".repeat(s.chars().count()),
            FieldInput::Choice { .. } => match self.value() {
                "" => "‹ Select ›".to_string(),
                v => format!("‹ {v} ›"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENDERS: &[&str] = &["Male", "Female"];

    #[test]
    fn test_number_field_rejects_non_digits() {
        let mut field = FormField::number("age", "Age");
        for c in "2a5-".chars() {
            field.push_char(c);
        }
        assert_eq!(field.value(), "25");
    }

    #[test]
    fn test_secret_field_is_masked() {
        let mut field = FormField::secret("password", "Password");
        field.set_value("secret1");
        assert_eq!(field.value(), "secret1");
        assert_eq!(field.display_value(), "•••••••");
    }

    #[test]
    fn test_choice_starts_unselected() {
        let field = FormField::choice("gender", "Gender", GENDERS);
        assert_eq!(field.value(), "");
        assert_eq!(field.display_value(), "‹ Select ›");
    }

    #[test]
    fn test_choice_cycles_forward_and_back() {
        let mut field = FormField::choice("gender", "Gender", GENDERS);
        field.next_option();
        assert_eq!(field.value(), "Male");
        field.next_option();
        assert_eq!(field.value(), "Female");
        field.next_option();
        assert_eq!(field.value(), "Male");
        field.prev_option();
        assert_eq!(field.value(), "Female");
    }

    #[test]
    fn test_choice_prev_from_unset_selects_last() {
        let mut field = FormField::choice("gender", "Gender", GENDERS);
        field.prev_option();
        assert_eq!(field.value(), "Female");
    }

    #[test]
    fn test_choice_set_value_unknown_clears() {
        let mut field = FormField::choice("gender", "Gender", GENDERS).preselect("Female");
        assert_eq!(field.value(), "Female");
        field.set_value("Other");
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_choice_ignores_typing_and_backspace_clears() {
        let mut field = FormField::choice("gender", "Gender", GENDERS).preselect("Male");
        field.push_char('x');
        assert_eq!(field.value(), "Male");
        field.pop_char();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_pop_char_on_empty_text_is_noop() {
        let mut field = FormField::text("name", "Name");
        field.pop_char();
        assert_eq!(field.value(), "");
    }
}
