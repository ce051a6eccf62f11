/// A named check applied to one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Value must be non-empty.
    Required,
    /// Value must parse as an email address.
    EmailFormat,
    /// Value must have at least `n` characters.
    MinLength(usize),
    /// Value must be longer than the configured password minimum.
    PasswordStrength,
}

impl Constraint {
    /// Key of the message template for this constraint.
    pub fn tag(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::EmailFormat => "email",
            Constraint::MinLength(_) => "min",
            Constraint::PasswordStrength => "password",
        }
    }

    /// Parameter substituted into the message template, if any.
    pub fn param(&self) -> Option<String> {
        match self {
            Constraint::MinLength(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// One row of a request's rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules<'a> {
    /// Field name as the client sees it.
    pub field: &'static str,
    pub value: &'a str,
    /// Checked in order.
    pub constraints: &'static [Constraint],
}

impl<'a> FieldRules<'a> {
    pub fn new(field: &'static str, value: &'a str, constraints: &'static [Constraint]) -> Self {
        Self {
            field,
            value,
            constraints,
        }
    }
}

/// Request types that declare a rule table.
pub trait Validate {
    /// Rows in field declaration order.
    fn rules(&self) -> Vec<FieldRules<'_>>;
}
