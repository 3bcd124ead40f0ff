use crate::forms::fields::{FormErrors, Rule};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Checkbox: present when ticked.
    pub remember: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FormErrors> {
        let email = self.email.trim();
        let errors = FormErrors::check(
            &[
                ("email", email, &[Rule::Required, Rule::Email, Rule::Length { min: 1, max: 100 }]),
                ("password", &self.password, &[Rule::Required]),
            ],
            |_| None,
        );
        errors.into_result(Credentials {
            email: email.to_string(),
            password: self.password.clone(),
            remember: self.remember_checked(),
        })
    }

    fn remember_checked(&self) -> bool {
        match self.remember.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "false" | "0" | "off" | "no"),
        }
    }

    pub fn echo(&self) -> Value {
        json!({ "email": self.email, "remember": self.remember_checked() })
    }
}
