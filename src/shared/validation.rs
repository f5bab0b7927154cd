//! Validation Utilities

use config::ConfigError;
use validator::ValidationErrors;

/// Convert validation errors into a configuration error naming the first
/// offending field.
pub fn validation_error(section: &str, errors: ValidationErrors) -> ConfigError {
    let mut field_errors: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect();
    field_errors.sort();

    let message = field_errors
        .first()
        .map(|(field, message)| format!("{}.{}: {}", section, field, message))
        .unwrap_or_else(|| format!("{}: validation failed", section));

    ConfigError::Message(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(range(min = 1, message = "must not be zero"))]
        port: u16,
    }

    #[test]
    fn test_validation_error_names_field() {
        let errors = Sample { port: 0 }.validate().unwrap_err();
        let err = validation_error("client", errors);
        assert_eq!(err.to_string(), "client.port: must not be zero");
    }
}
