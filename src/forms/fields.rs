//! Field rules and the error map they produce.

use crate::service::is_email;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug)]
pub enum Rule {
    /// Present and not only whitespace.
    Required,
    /// Character count within `min..=max`.
    Length { min: usize, max: usize },
    Email,
    /// Equal to the value of the named field.
    EqualTo(&'static str),
    Integer,
    NonNegative,
}

impl Rule {
    /// Error message when `value` fails this rule; `form` resolves other fields.
    fn check<'a>(&self, value: &str, form: &impl Fn(&str) -> Option<&'a str>) -> Option<String> {
        match *self {
            Rule::Required => value.trim().is_empty().then(|| "This field is required.".to_string()),
            Rule::Length { min, max } => {
                let n = value.chars().count();
                (n < min || n > max)
                    .then(|| format!("Field must be between {} and {} characters long.", min, max))
            }
            Rule::Email => (!is_email(value)).then(|| "Invalid email address.".to_string()),
            Rule::EqualTo(other) => {
                (form(other) != Some(value)).then(|| format!("Field must be equal to {}.", other))
            }
            Rule::Integer => value
                .trim()
                .parse::<i64>()
                .is_err()
                .then(|| "Not a valid integer value.".to_string()),
            Rule::NonNegative => match value.trim().parse::<i64>() {
                Ok(n) if n < 0 => Some("Number must be at least 0.".to_string()),
                _ => None,
            },
        }
    }
}

/// Messages per field name, in field-name order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Run `rules` for each field. A field that fails `Required` is not checked further.
    pub fn check<'a>(fields: &[(&str, &'a str, &[Rule])], form: impl Fn(&str) -> Option<&'a str>) -> Self {
        let mut errors = FormErrors::default();
        for (name, value, rules) in fields {
            for rule in *rules {
                if let Some(message) = rule.check(value, &form) {
                    errors.add(name, message);
                    if matches!(rule, Rule::Required) {
                        break;
                    }
                }
            }
        }
        errors
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none(_: &str) -> Option<&'static str> {
        None
    }

    #[test]
    fn required_stops_further_rules() {
        let errors = FormErrors::check(&[("name", "  ", &[Rule::Required, Rule::Length { min: 2, max: 20 }])], none);
        assert_eq!(errors.field("name"), ["This field is required."]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let rules = [Rule::Length { min: 2, max: 3 }];
        assert!(FormErrors::check(&[("name", "ñññ", &rules)], none).is_empty());
        assert!(!FormErrors::check(&[("name", "ññññ", &rules)], none).is_empty());
    }

    #[test]
    fn equal_to_compares_other_field() {
        let lookup = |name: &str| (name == "password").then_some("secret");
        let ok = FormErrors::check(&[("confirm", "secret", &[Rule::EqualTo("password")])], lookup);
        assert!(ok.is_empty());
        let bad = FormErrors::check(&[("confirm", "other", &[Rule::EqualTo("password")])], lookup);
        assert_eq!(bad.field("confirm"), ["Field must be equal to password."]);
    }

    #[test]
    fn integer_rules() {
        let rules = [Rule::Integer, Rule::NonNegative];
        assert!(FormErrors::check(&[("price", " 12 ", &rules)], none).is_empty());
        assert_eq!(
            FormErrors::check(&[("price", "12.5", &rules)], none).field("price"),
            ["Not a valid integer value."]
        );
        assert_eq!(
            FormErrors::check(&[("price", "-1", &rules)], none).field("price"),
            ["Number must be at least 0."]
        );
    }
}
