//! Login and registration form definitions
//!
//! Both forms are plain configuration: the field list, the rules and the
//! endpoint. Swapping the endpoint path or loosening a rule does not need a
//! second form implementation.

use super::field::FormField;
use super::rules::{FieldRule, RuleSet};
use crate::auth::Endpoint;

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female"];
pub const QUALIFICATION_OPTIONS: &[&str] =
    &["Post Graduate", "Graduate", "Diploma", "High School"];
pub const EXPERIENCE_OPTIONS: &[&str] = &["0-2", "3-7", "7-10", "10-50"];
pub const ROLE_OPTIONS: &[&str] = &["User", "Job Provider"];

pub const NAME_MIN_CHARS: usize = 4;
pub const NAME_MAX_CHARS: usize = 25;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Login,
    Register,
}

/// Everything that distinguishes one account form from another
#[derive(Debug, Clone)]
pub struct FormSchema {
    pub kind: FormKind,
    pub title: &'static str,
    pub submit_label: &'static str,
    /// Label of the button that switches to the other form
    pub link_label: &'static str,
    pub fields: Vec<FormField>,
    pub rules: RuleSet,
    pub endpoint: Endpoint,
}

impl FormSchema {
    pub fn login() -> Self {
        let rules = RuleSet::new()
            .with_rules(
                "email",
                vec![
                    FieldRule::required("Please enter your email address."),
                    FieldRule::email("Please enter a valid email address."),
                ],
            )
            .with_rules(
                "password",
                vec![
                    FieldRule::required("Please enter your password."),
                    FieldRule::min_length(
                        PASSWORD_MIN_CHARS,
                        "Password must be at least 6 characters.",
                    ),
                ],
            );

        Self::assemble(
            FormKind::Login,
            "Login to your Job Portal",
            "Log In",
            "Sign Up",
            vec![
                FormField::text("email", "Email"),
                FormField::secret("password", "Password"),
            ],
            rules,
            Endpoint::login(),
        )
    }

    pub fn register() -> Self {
        let rules = RuleSet::new()
            .with_rules(
                "name",
                vec![
                    FieldRule::required("Name is required"),
                    FieldRule::min_length(NAME_MIN_CHARS, "Name must be at least 4 characters"),
                    FieldRule::max_length(NAME_MAX_CHARS, "Name must be at most 25 characters"),
                ],
            )
            .with_rules(
                "email",
                vec![
                    FieldRule::required("Email is required"),
                    FieldRule::email("Invalid email"),
                ],
            )
            .with_rules(
                "password",
                vec![
                    FieldRule::required("Password is required"),
                    FieldRule::min_length(
                        PASSWORD_MIN_CHARS,
                        "Password must be at least 6 characters",
                    ),
                ],
            )
            .with_rules(
                "mobile",
                vec![
                    FieldRule::required("Mobile number required"),
                    FieldRule::mobile("Must be 10 digits"),
                ],
            )
            .with_rules(
                "age",
                vec![
                    FieldRule::required("Age required"),
                    FieldRule::int_range(MIN_AGE, MAX_AGE, "Age must be between 18 and 60"),
                ],
            )
            .with_rules(
                "gender",
                vec![
                    FieldRule::required("Gender required"),
                    FieldRule::one_of(GENDER_OPTIONS, "Gender required"),
                ],
            )
            .with_rules(
                "qualification",
                vec![
                    FieldRule::required("Qualification required"),
                    FieldRule::one_of(QUALIFICATION_OPTIONS, "Qualification required"),
                ],
            )
            .with_rules(
                "experience",
                vec![FieldRule::one_of(EXPERIENCE_OPTIONS, "Invalid experience")],
            )
            .with_rules("role", vec![FieldRule::one_of(ROLE_OPTIONS, "Invalid role")]);

        Self::assemble(
            FormKind::Register,
            "Register",
            "Register",
            "Back to Login",
            vec![
                FormField::text("name", "Name"),
                FormField::text("email", "Email"),
                FormField::secret("password", "Password"),
                FormField::text("mobile", "Mobile No"),
                FormField::number("age", "Age"),
                FormField::choice("gender", "Gender", GENDER_OPTIONS),
                FormField::choice("qualification", "Qualification", QUALIFICATION_OPTIONS),
                FormField::choice("experience", "Experience", EXPERIENCE_OPTIONS),
                FormField::choice("role", "Role", ROLE_OPTIONS).preselect("User"),
            ],
            rules,
            Endpoint::register(),
        )
    }

    /// Swap the rules (e.g. to make `experience` required)
    #[cfg_attr(not(test), allow(dead_code))] // shipped forms use the default rules
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self.fields = mark_mandatory(self.fields, &self.rules);
        self
    }

    fn assemble(
        kind: FormKind,
        title: &'static str,
        submit_label: &'static str,
        link_label: &'static str,
        fields: Vec<FormField>,
        rules: RuleSet,
        endpoint: Endpoint,
    ) -> Self {
        Self {
            kind,
            title,
            submit_label,
            link_label,
            fields: mark_mandatory(fields, &rules),
            rules,
            endpoint,
        }
    }

    /// JSON request body for the current field values.
    ///
    /// Numeric fields go out as numbers when they parse, otherwise as the
    /// raw string.
    pub fn payload(&self, fields: &[FormField]) -> serde_json::Value {
        let body = fields
            .iter()
            .map(|field| {
                let value = match field.value().trim().parse::<i64>() {
                    Ok(n) if field.is_numeric() => serde_json::Value::from(n),
                    _ => serde_json::Value::from(field.value()),
                };
                (field.name.to_string(), value)
            })
            .collect();
        serde_json::Value::Object(body)
    }
}

/// Requiredness follows the rule set
fn mark_mandatory(fields: Vec<FormField>, rules: &RuleSet) -> Vec<FormField> {
    fields
        .into_iter()
        .map(|mut field| {
            field.mandatory = rules.is_required(field.name);
            field
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(schema: &FormSchema) -> Vec<&'static str> {
        schema.fields.iter().map(|f| f.name).collect()
    }

    #[test]
    fn test_login_fields_and_endpoint() {
        let schema = FormSchema::login();
        assert_eq!(names(&schema), vec!["email", "password"]);
        assert_eq!(schema.endpoint, Endpoint::login());
        assert!(schema.fields.iter().all(|f| f.mandatory));
    }

    #[test]
    fn test_register_fields_and_endpoint() {
        let schema = FormSchema::register();
        assert_eq!(
            names(&schema),
            vec![
                "name",
                "email",
                "password",
                "mobile",
                "age",
                "gender",
                "qualification",
                "experience",
                "role"
            ]
        );
        assert_eq!(schema.endpoint.path, "/auth/signup");
    }

    #[test]
    fn test_register_optional_fields_are_not_mandatory() {
        let schema = FormSchema::register();
        let optional: Vec<_> = schema
            .fields
            .iter()
            .filter(|f| !f.mandatory)
            .map(|f| f.name)
            .collect();
        assert_eq!(optional, vec!["experience", "role"]);
    }

    #[test]
    fn test_role_defaults_to_user() {
        let schema = FormSchema::register();
        let role = schema.fields.iter().find(|f| f.name == "role").unwrap();
        assert_eq!(role.value(), "User");
    }

    #[test]
    fn test_with_rules_updates_mandatory_markers() {
        let schema = FormSchema::register();
        let rules = schema.rules.clone().with_rules(
            "experience",
            vec![
                FieldRule::required("Experience required"),
                FieldRule::one_of(EXPERIENCE_OPTIONS, "Experience required"),
            ],
        );
        let schema = schema.with_rules(rules);
        let experience = schema
            .fields
            .iter()
            .find(|f| f.name == "experience")
            .unwrap();
        assert!(experience.mandatory);
    }

    #[test]
    fn test_payload_sends_age_as_number() {
        let schema = FormSchema::register();
        let mut fields = schema.fields.clone();
        for field in &mut fields {
            match field.name {
                "name" => field.set_value("Alice"),
                "age" => field.set_value("30"),
                "gender" => field.set_value("Female"),
                _ => {}
            }
        }

        let payload = schema.payload(&fields);
        assert_eq!(payload["name"], json!("Alice"));
        assert_eq!(payload["age"], json!(30));
        assert_eq!(payload["gender"], json!("Female"));
        assert_eq!(payload["experience"], json!(""));
        assert_eq!(payload["role"], json!("User"));
    }

    #[test]
    fn test_login_payload_has_only_credentials() {
        let schema = FormSchema::login();
        let mut fields = schema.fields.clone();
        fields[0].set_value("a@b.com");
        fields[1].set_value("secret1");
        assert_eq!(
            schema.payload(&fields),
            json!({"email": "a@b.com", "password": "secret1"})
        );
    }
}
