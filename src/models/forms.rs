//! Auth form models
//!
//! Registration, login, and password reset each own an independent form
//! model with only the fields that flow actually submits. Validation runs
//! locally before anything touches the network and produces a per-field
//! error map keyed by the field's wire name.

use std::collections::BTreeMap;

/// Per-field validation errors, keyed by wire field name
pub type FieldErrors = BTreeMap<String, String>;

/// Registration form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Run the five registration validators.
    ///
    /// Returns an empty map when every field passes. Each failing field
    /// contributes exactly one message.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.name.len() < 2 {
            errors.insert(
                "name".into(),
                "Name must be at least 2 characters long".into(),
            );
        }

        if self.user_name.len() < 2 || !starts_with_capital(&self.user_name) {
            errors.insert(
                "userName".into(),
                "Username must be at least 2 characters long and start with a capital letter"
                    .into(),
            );
        }

        if !is_valid_email(&self.email) {
            errors.insert("email".into(), "Invalid email address".into());
        }

        if !is_valid_password(&self.password) {
            errors.insert(
                "password".into(),
                "Password must be at least 6 characters long and contain at least one number"
                    .into(),
            );
        }

        if self.confirm_password != self.password {
            errors.insert("confirmPassword".into(), "Passwords do not match".into());
        }

        errors
    }

    /// Reset every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Login form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub user_name: String,
    pub password: String,
}

impl LoginForm {
    /// Login only requires both fields to be present
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.user_name.is_empty() {
            errors.insert("userName".into(), "Username is required".into());
        }

        if self.password.is_empty() {
            errors.insert("password".into(), "Password is required".into());
        }

        errors
    }

    /// Reset every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Password reset form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordResetForm {
    pub email: String,
    pub new_password: String,
}

impl PasswordResetForm {
    /// Validate the reset request fields
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if !is_valid_email(&self.email) {
            errors.insert("email".into(), "Invalid email address".into());
        }

        if !is_valid_password(&self.new_password) {
            errors.insert(
                "newPassword".into(),
                "Password must be at least 6 characters long and contain at least one number"
                    .into(),
            );
        }

        errors
    }

    /// Reset every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Loose `x@y.z` email shape: non-empty local part, a dot somewhere in the
/// domain, no whitespace anywhere.
fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// At least 6 characters with at least one digit
fn is_valid_password(value: &str) -> bool {
    value.len() >= 6 && value.chars().any(|c| c.is_ascii_digit())
}

fn starts_with_capital(value: &str) -> bool {
    value.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_registration() -> RegistrationForm {
        RegistrationForm {
            name: "Alice".into(),
            user_name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(valid_registration().validate().is_empty());
    }

    #[test]
    fn test_short_name_rejected() {
        let mut form = valid_registration();
        form.name = "A".into();

        let errors = form.validate();
        assert_eq!(
            errors.get("name").map(String::as_str),
            Some("Name must be at least 2 characters long")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_username_must_start_with_capital() {
        let mut form = valid_registration();
        form.user_name = "alice".into();

        let errors = form.validate();
        assert!(errors.contains_key("userName"));
    }

    #[test]
    fn test_short_username_rejected() {
        let mut form = valid_registration();
        form.user_name = "A".into();

        assert!(form.validate().contains_key("userName"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        for bad in ["", "alice", "alice@", "@example.com", "alice@example", "a b@c.d"] {
            let mut form = valid_registration();
            form.email = bad.into();
            assert!(
                form.validate().contains_key("email"),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_password_needs_length_and_digit() {
        let mut form = valid_registration();
        form.password = "short1".into();
        form.confirm_password = "short1".into();
        assert!(form.validate().is_empty());

        form.password = "abc1".into();
        form.confirm_password = "abc1".into();
        assert!(form.validate().contains_key("password"));

        form.password = "abcdefgh".into();
        form.confirm_password = "abcdefgh".into();
        assert!(form.validate().contains_key("password"));
    }

    #[test]
    fn test_password_mismatch() {
        let mut form = valid_registration();
        form.confirm_password = "secret2".into();

        let errors = form.validate();
        assert_eq!(
            errors.get("confirmPassword").map(String::as_str),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_multiple_failures_all_reported() {
        let form = RegistrationForm::default();
        let errors = form.validate();

        // Every rule fails on an empty form (confirm == password, so that
        // one passes)
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("userName"));
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
        assert!(!errors.contains_key("confirmPassword"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            user_name: "Alice".into(),
            password: String::new(),
        };

        let errors = form.validate();
        assert_eq!(
            errors.get("password").map(String::as_str),
            Some("Password is required")
        );
        assert!(!errors.contains_key("userName"));

        let empty = LoginForm::default();
        let errors = empty.validate();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_reset_form_validation() {
        let form = PasswordResetForm {
            email: "alice@example.com".into(),
            new_password: "secret1".into(),
        };
        assert!(form.validate().is_empty());

        let bad = PasswordResetForm {
            email: "nope".into(),
            new_password: "short".into(),
        };
        let errors = bad.validate();
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("newPassword"));
    }

    #[test]
    fn test_clear_resets_fields() {
        let mut form = valid_registration();
        form.clear();
        assert_eq!(form, RegistrationForm::default());

        let mut login = LoginForm {
            user_name: "Alice".into(),
            password: "pw".into(),
        };
        login.clear();
        assert_eq!(login, LoginForm::default());
    }
}
