//! Validation gate for submitted commands
//!
//! Runs the declarative `validator` constraints on a command and flattens the
//! result into a list of [`FieldError`]s named the way clients spell them
//! (`initAmount`, `expenses[1].amount`).

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::{FieldError, MyBudgetError, MyBudgetResult};

/// Check every constraint declared on `command`
pub fn validate_command<C: Validate>(command: &C) -> MyBudgetResult<()> {
    command
        .validate()
        .map_err(|errors| MyBudgetError::Validation(flatten(&errors)))
}

/// Flatten nested validation errors into sorted field errors
pub fn flatten(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, &camel_case(field));
        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    let message = failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", failure.code));
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
