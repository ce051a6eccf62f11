use super::messages::Translator;
use super::report::ValidationReport;
use super::rules::Constraint;
use super::rules::Validate;

/// Evaluates rule tables.
///
/// Every field is checked, so a report lists all invalid fields at once.
/// Within a field the constraints run in order and the first violation is
/// the only one reported for that field.
#[derive(Debug, Clone)]
pub struct Validator {
    password_min_length: usize,
    translator: Translator,
}

impl Validator {
    pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 6;

    /// Create a validator whose `PasswordStrength` constraint requires more
    /// than `password_min_length` characters.
    pub fn new(password_min_length: usize) -> Self {
        Self {
            password_min_length,
            translator: Translator::english(),
        }
    }

    pub fn validate<T: Validate + ?Sized>(&self, request: &T) -> ValidationReport {
        let mut report = ValidationReport::new();

        for rules in request.rules() {
            let violated = rules
                .constraints
                .iter()
                .find(|constraint| !self.satisfies(constraint, rules.value));

            if let Some(constraint) = violated {
                report.push(rules.field, self.translator.translate(constraint, rules.field));
            }
        }

        report
    }

    fn satisfies(&self, constraint: &Constraint, value: &str) -> bool {
        match constraint {
            Constraint::Required => !value.is_empty(),
            Constraint::EmailFormat => email_address::EmailAddress::is_valid(value),
            Constraint::MinLength(n) => value.chars().count() >= *n,
            Constraint::PasswordStrength => value.chars().count() > self.password_min_length,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PASSWORD_MIN_LENGTH)
    }
}
