use crate::forms::fields::{FormErrors, Rule};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// A registration that passed every field rule.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<Registration, FormErrors> {
        let username = self.username.trim();
        let email = self.email.trim();
        let errors = FormErrors::check(
            &[
                ("username", username, &[Rule::Required, Rule::Length { min: 2, max: 20 }]),
                ("email", email, &[Rule::Required, Rule::Email, Rule::Length { min: 1, max: 100 }]),
                ("password", &self.password, &[Rule::Required]),
                ("confirm_password", &self.confirm_password, &[Rule::Required, Rule::EqualTo("password")]),
            ],
            |name| (name == "password").then_some(self.password.as_str()),
        );
        errors.into_result(Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }

    /// Submitted values to refill the form, without passwords.
    pub fn echo(&self) -> Value {
        json!({ "username": self.username, "email": self.email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, email: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn valid_registration_is_trimmed() {
        let r = form(" ana ", " ana@example.com ", "pw", "pw").validate().unwrap();
        assert_eq!(r.username, "ana");
        assert_eq!(r.email, "ana@example.com");
    }

    #[test]
    fn every_failing_field_is_reported() {
        let errors = form("a", "not-an-email", "pw", "wp").validate().unwrap_err();
        assert_eq!(errors.field("username").len(), 1);
        assert_eq!(errors.field("email"), ["Invalid email address."]);
        assert_eq!(errors.field("confirm_password"), ["Field must be equal to password."]);
        assert!(errors.field("password").is_empty());
    }

    #[test]
    fn username_longer_than_twenty_is_rejected() {
        let errors = form(&"x".repeat(21), "a@b.io", "pw", "pw").validate().unwrap_err();
        assert_eq!(errors.field("username"), ["Field must be between 2 and 20 characters long."]);
    }

    #[test]
    fn email_longer_than_column_is_rejected() {
        let email = format!("{}@example.com", "a".repeat(100));
        let errors = form("ana", &email, "pw", "pw").validate().unwrap_err();
        assert_eq!(errors.field("email"), ["Field must be between 1 and 100 characters long."]);
    }

    #[test]
    fn echo_never_contains_passwords() {
        let echoed = form("ana", "a@b.io", "secret", "secret").echo();
        assert!(!echoed.to_string().contains("secret"));
    }
}
