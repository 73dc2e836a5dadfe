//! Login and sign-up form validation

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::{DishhubError, LoginForm, SignUpForm};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"))
}

fn required(errors: &mut Vec<FieldError>, field: &'static str, value: &str, message: &'static str) -> bool {
    if value.trim().is_empty() {
        errors.push(FieldError { field, message });
        false
    } else {
        true
    }
}

fn password(errors: &mut Vec<FieldError>, value: &str) {
    if value.is_empty() {
        errors.push(FieldError {
            field: "password",
            message: "Password is required",
        });
    } else if value.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError {
            field: "password",
            message: "Password must be at least 6 characters",
        });
    }
}

/// All failing login fields, in form order
pub fn validate_login(form: &LoginForm) -> Vec<FieldError> {
    let mut errors = Vec::new();
    required(&mut errors, "username", &form.username, "Username is required");
    password(&mut errors, &form.password);
    errors
}

/// All failing sign-up fields, in form order
pub fn validate_sign_up(form: &SignUpForm) -> Vec<FieldError> {
    let mut errors = Vec::new();
    required(&mut errors, "first_name", &form.first_name, "First name is required");
    required(&mut errors, "last_name", &form.last_name, "Last name is required");
    required(&mut errors, "username", &form.username, "Username is required");
    if required(&mut errors, "email", &form.email, "Email is required")
        && !email_regex().is_match(form.email.trim())
    {
        errors.push(FieldError {
            field: "email",
            message: "Invalid email",
        });
    }
    password(&mut errors, &form.password);
    errors
}

/// Collapse field errors into a single `Validation` error
pub fn into_result(errors: Vec<FieldError>) -> crate::types::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(DishhubError::Validation(joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_sign_up() -> SignUpForm {
        SignUpForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            username: "ada".into(),
            email: "ada@dishhub.test".into(),
            password: "secret1".into(),
        }
    }

    #[test]
    fn test_login_valid() {
        let form = LoginForm {
            username: "admin".into(),
            password: "hunter22".into(),
        };
        assert!(validate_login(&form).is_empty());
    }

    #[test]
    fn test_login_missing_everything() {
        let errors = validate_login(&LoginForm::default());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "username");
        assert_eq!(errors[1].message, "Password is required");
    }

    #[test]
    fn test_login_short_password() {
        let form = LoginForm {
            username: "admin".into(),
            password: "12345".into(),
        };
        let errors = validate_login(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Password must be at least 6 characters");
    }

    #[test]
    fn test_sign_up_valid() {
        assert!(validate_sign_up(&valid_sign_up()).is_empty());
    }

    #[test]
    fn test_sign_up_bad_email() {
        for email in ["ada", "ada@", "ada@host", "a da@host.com", "@host.com"] {
            let form = SignUpForm {
                email: email.into(),
                ..valid_sign_up()
            };
            let errors = validate_sign_up(&form);
            assert_eq!(errors.len(), 1, "{} should be rejected", email);
            assert_eq!(errors[0].message, "Invalid email");
        }
    }

    #[test]
    fn test_sign_up_missing_email_reports_required_only() {
        let form = SignUpForm {
            email: String::new(),
            ..valid_sign_up()
        };
        let errors = validate_sign_up(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Email is required");
    }

    #[test]
    fn test_sign_up_errors_in_form_order() {
        let errors = validate_sign_up(&SignUpForm::default());
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["first_name", "last_name", "username", "email", "password"]
        );
    }

    #[test]
    fn test_into_result_joins_messages() {
        let err = into_result(validate_login(&LoginForm::default())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: username: Username is required; password: Password is required"
        );
        assert!(into_result(Vec::new()).is_ok());
    }
}
