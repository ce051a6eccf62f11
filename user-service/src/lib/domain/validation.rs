//! Declarative request validation.
//!
//! Each request type lists its fields and their constraints in a static
//! table ([`Validate`]); one [`Validator`] walks any table and renders every
//! violation through the message catalog. Validation never fails: an empty
//! [`ValidationReport`] means the request is valid.

pub mod messages;
pub mod report;
pub mod rules;
pub mod validator;

pub use messages::Translator;
pub use report::ValidationError;
pub use report::ValidationReport;
pub use rules::Constraint;
pub use rules::FieldRules;
pub use rules::Validate;
pub use validator::Validator;
