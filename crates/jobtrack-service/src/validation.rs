//! Input validation helpers.

use validator::{Validate, ValidationErrors};

use jobtrack_core::error::AppError;

/// Run derived validation and map failures to a `Validation` error listing
/// the offending fields.
pub(crate) fn validate<T: Validate>(input: &T) -> Result<(), AppError> {
    input.validate().map_err(|e| AppError::validation(describe(&e)))
}

fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let detail = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{field}: {detail}")
        })
        .collect();
    fields.sort();
    format!("Invalid input ({})", fields.join("; "))
}

/// Trim an optional free-text field, mapping blank values to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
