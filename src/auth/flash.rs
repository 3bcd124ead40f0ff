//! One-shot messages carried to the next rendered page in the `flash` cookie.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Danger,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Flash {
            category: FlashCategory::Info,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Flash {
            category: FlashCategory::Danger,
            message: message.into(),
        }
    }

    /// Cookie-safe encoding of a list of flashes.
    pub fn encode(flashes: &[Flash]) -> String {
        let json = serde_json::to_vec(flashes).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Inverse of `encode`; anything malformed decodes to no flashes.
    pub fn decode(raw: &str) -> Vec<Flash> {
        URL_SAFE_NO_PAD
            .decode(raw)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default()
    }
}
