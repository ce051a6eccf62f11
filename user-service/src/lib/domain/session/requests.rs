use std::fmt;

use serde::Deserialize;

use crate::validation::Constraint;
use crate::validation::FieldRules;
use crate::validation::Validate;

/// Login payload.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn rules(&self) -> Vec<FieldRules<'_>> {
        vec![
            FieldRules::new(
                "email",
                &self.email,
                &[Constraint::Required, Constraint::EmailFormat],
            ),
            FieldRules::new("password", &self.password, &[Constraint::Required]),
        ]
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Refresh payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

impl Validate for RefreshRequest {
    fn rules(&self) -> Vec<FieldRules<'_>> {
        vec![FieldRules::new(
            "refreshToken",
            &self.refresh_token,
            &[Constraint::Required],
        )]
    }
}
