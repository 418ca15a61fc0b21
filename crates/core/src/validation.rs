//! Request validation port.
//!
//! Request types declare their constraints with `#[derive(Validate)]`. A
//! [`RequestValidator`] checks a request against those constraints and
//! reports every violation at once as a [`ValidationFailure`].

use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path of the offending field (`ids`, `address.city`, `items[2].id`).
    pub field: String,
    /// Constraint code, e.g. `length`, `range`, `positive`.
    pub rule: String,
    /// Human-readable description including the offending value when known.
    pub message: String,
}

/// Structured validation error listing all violated constraints, sorted by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", render(.violations))]
pub struct ValidationFailure {
    pub violations: Vec<Violation>,
}

impl ValidationFailure {
    /// True if `field` has at least one violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations = Vec::new();
        collect(&errors, "", &mut violations);
        violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.rule.cmp(&b.rule)));
        Self { violations }
    }
}

/// Checks request values against their declared constraints.
///
/// Implementations must be stateless so a single instance can be shared by
/// every request handled by the process.
pub trait RequestValidator: Send + Sync {
    fn validate<R: Validate>(&self, request: &R) -> Result<(), ValidationFailure>;
}

/// Default validator backed by the `validator` derive constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintValidator;

impl RequestValidator for ConstraintValidator {
    fn validate<R: Validate>(&self, request: &R) -> Result<(), ValidationFailure> {
        request.validate().map_err(ValidationFailure::from)
    }
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<Violation>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|err| Violation {
                    field: path.clone(),
                    rule: err.code.to_string(),
                    message: describe(err),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }

    let param = |name: &str| err.params.get(name).map(|v| v.to_string());
    let value = param("value");
    let constraint = match (&*err.code, param("min"), param("max")) {
        ("length", Some(min), Some(max)) => format!("length must be between {min} and {max}"),
        ("length", Some(min), None) => format!("length must be at least {min}"),
        ("length", None, Some(max)) => format!("length must be at most {max}"),
        ("range", Some(min), Some(max)) => format!("must be between {min} and {max}"),
        ("range", Some(min), None) => format!("must be at least {min}"),
        ("range", None, Some(max)) => format!("must be at most {max}"),
        ("required", _, _) => "is required".to_string(),
        (code, _, _) => format!("failed `{code}` check"),
    };

    match value {
        Some(value) => format!("{constraint} (got {value})"),
        None => constraint,
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}
