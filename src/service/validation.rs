//! Request validation from descriptor rules. Presence of required fields is the only rule.

use crate::error::AppError;
use crate::model::{EntityDescriptor, FieldValues};

pub struct RequestValidator;

impl RequestValidator {
    /// All required fields must be present and non-empty.
    pub fn validate(entity: &EntityDescriptor, values: &FieldValues) -> Result<(), AppError> {
        match entity.missing_required(values) {
            Some(field) => Err(AppError::Validation(format!("{} is required!", field.label))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{COMPUTER_SYSTEM, ROUTER};

    #[test]
    fn empty_host_name_is_rejected_with_label() {
        let mut values = FieldValues::new();
        values.insert("host_name".into(), Some(String::new()));
        let err = RequestValidator::validate(&COMPUTER_SYSTEM, &values).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Host Name is required!"));
    }

    #[test]
    fn whitespace_host_name_is_accepted() {
        let mut values = FieldValues::new();
        values.insert("host_name".into(), Some(" ".into()));
        assert!(RequestValidator::validate(&COMPUTER_SYSTEM, &values).is_ok());
    }

    #[test]
    fn router_accepts_empty_values() {
        assert!(RequestValidator::validate(&ROUTER, &FieldValues::new()).is_ok());
    }
}
