use std::fmt;

use serde::Deserialize;

use crate::user::models::UpdateUserCommand;
use crate::validation::Constraint;
use crate::validation::FieldRules;
use crate::validation::Validate;

/// Signup payload.
///
/// Absent fields decode as empty strings so that they are reported by the
/// `required` rule rather than rejected by the decoder.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Validate for RegisterRequest {
    fn rules(&self) -> Vec<FieldRules<'_>> {
        vec![
            FieldRules::new("firstName", &self.first_name, &[Constraint::Required]),
            FieldRules::new("lastName", &self.last_name, &[Constraint::Required]),
            FieldRules::new(
                "email",
                &self.email,
                &[Constraint::Required, Constraint::EmailFormat],
            ),
            FieldRules::new(
                "password",
                &self.password,
                &[Constraint::Required, Constraint::PasswordStrength],
            ),
        ]
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Profile update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateRequest {
    pub first_name: String,
    pub last_name: String,
}

impl UpdateRequest {
    pub fn into_command(self) -> UpdateUserCommand {
        UpdateUserCommand {
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

impl Validate for UpdateRequest {
    fn rules(&self) -> Vec<FieldRules<'_>> {
        vec![
            FieldRules::new("firstName", &self.first_name, &[Constraint::Required]),
            FieldRules::new("lastName", &self.last_name, &[Constraint::Required]),
        ]
    }
}
