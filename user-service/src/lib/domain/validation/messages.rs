use super::rules::Constraint;

/// English templates keyed by constraint tag.
/// `{0}` is replaced by the field name, `{1}` by the constraint parameter.
const EN: &[(&str, &str)] = &[
    ("required", "{0} is a required field"),
    ("email", "{0} must be a valid email"),
    ("min", "{0} must be at least {1} characters in length"),
    ("password", "{0} is not strong enough"),
];

/// Renders constraint violations as human-readable messages.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    templates: &'static [(&'static str, &'static str)],
}

impl Translator {
    pub fn english() -> Self {
        Self { templates: EN }
    }

    /// Message for `field` failing `constraint`.
    pub fn translate(&self, constraint: &Constraint, field: &str) -> String {
        let tag = constraint.tag();

        match self.templates.iter().find(|(key, _)| *key == tag) {
            Some((_, template)) => {
                let message = template.replace("{0}", field);
                match constraint.param() {
                    Some(param) => message.replace("{1}", &param),
                    None => message,
                }
            }
            None => format!("{} failed on the '{}' rule", field, tag),
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::english()
    }
}
