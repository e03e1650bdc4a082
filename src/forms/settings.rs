use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Maximum length allowed for a settings key.
const KEY_MAX_LEN: usize = 128;
/// Maximum length allowed for a settings value.
const VALUE_MAX_LEN: usize = 2048;

/// Result type returned by the settings form helpers.
pub type SettingsFormResult<T> = Result<T, SettingsFormError>;

/// Errors that can occur while processing settings forms.
#[derive(Debug, Error)]
pub enum SettingsFormError {
    /// A key was empty after trimming.
    #[error("settings key cannot be empty")]
    EmptyKey,
    /// A key exceeded the allowed length.
    #[error("settings key `{0}` is too long")]
    KeyTooLong(String),
    /// A value exceeded the allowed length.
    #[error("settings value for `{0}` is too long")]
    ValueTooLong(String),
    /// The payload contained no settings at all.
    #[error("no settings to update")]
    Empty,
}

/// JSON payload accepted when updating a store's settings bag. The body is a
/// flat object of string keys to string values.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsForm(pub HashMap<String, String>);

impl UpdateSettingsForm {
    /// Trims keys and values and rejects empty or oversized entries. The
    /// resulting pairs are fed to the transactional upsert as-is.
    pub fn into_pairs(self) -> SettingsFormResult<Vec<(String, String)>> {
        if self.0.is_empty() {
            return Err(SettingsFormError::Empty);
        }

        let mut pairs = Vec::with_capacity(self.0.len());
        for (key, value) in self.0 {
            let key = key.trim().to_string();
            if key.is_empty() {
                return Err(SettingsFormError::EmptyKey);
            }
            if key.len() > KEY_MAX_LEN {
                return Err(SettingsFormError::KeyTooLong(key));
            }

            let value = value.trim().to_string();
            if value.len() > VALUE_MAX_LEN {
                return Err(SettingsFormError::ValueTooLong(key));
            }

            pairs.push((key, value));
        }

        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(pairs)
    }
}
