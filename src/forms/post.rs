use crate::forms::fields::{FormErrors, Rule};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub price: String,
    pub img_url: String,
    /// Comma-separated category labels.
    pub categories: String,
}

/// A post ready to be attributed to an author and stored.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub price: i64,
    pub img_url: String,
    pub categories: Vec<String>,
}

impl PostForm {
    pub fn validate(&self) -> Result<PostDraft, FormErrors> {
        let title = self.title.trim();
        let subtitle = self.subtitle.trim();
        let img_url = self.img_url.trim();
        let errors = FormErrors::check(
            &[
                ("title", title, &[Rule::Required, Rule::Length { min: 1, max: 250 }]),
                ("subtitle", subtitle, &[Rule::Required, Rule::Length { min: 1, max: 250 }]),
                ("description", &self.description, &[Rule::Required]),
                ("price", &self.price, &[Rule::Required, Rule::Integer, Rule::NonNegative]),
                ("img_url", img_url, &[Rule::Required, Rule::Length { min: 1, max: 250 }]),
            ],
            |_| None,
        );
        if !errors.is_empty() {
            return Err(errors);
        }
        let price = match self.price.trim().parse() {
            Ok(p) => p,
            Err(_) => {
                let mut errors = FormErrors::default();
                errors.add("price", "Not a valid integer value.");
                return Err(errors);
            }
        };
        Ok(PostDraft {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            description: self.description.clone(),
            price,
            img_url: img_url.to_string(),
            categories: self.category_labels(),
        })
    }

    /// Trimmed, non-empty, de-duplicated labels in submission order.
    fn category_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for label in self.categories.split(',').map(str::trim).filter(|l| !l.is_empty()) {
            if !labels.iter().any(|l| l == label) {
                labels.push(label.to_string());
            }
        }
        labels
    }

    pub fn echo(&self) -> Value {
        json!({
            "title": self.title,
            "subtitle": self.subtitle,
            "description": self.description,
            "price": self.price,
            "img_url": self.img_url,
            "categories": self.categories,
        })
    }
}
