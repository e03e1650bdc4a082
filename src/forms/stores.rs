use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::store::{NewStore, UpdateStoreStatus};
use crate::forms::{sanitize_inline_text, sanitize_optional_text};

/// Maximum length allowed for a store name.
const NAME_MAX_LEN: u64 = 128;
/// Maximum length allowed for a phone number.
const PHONE_MAX_LEN: u64 = 20;

/// Result type returned by the store form helpers.
pub type StoreFormResult<T> = Result<T, StoreFormError>;

/// Errors that can occur while processing store forms.
#[derive(Debug, Error)]
pub enum StoreFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("store name cannot be empty")]
    EmptyName,
    /// A deactivation was submitted without a reason.
    #[error("deactivation requires a reason")]
    MissingReason,
}

/// JSON payload accepted when registering a store.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterStoreForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(max = PHONE_MAX_LEN))]
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl RegisterStoreForm {
    /// Validates and sanitizes the payload into a domain `NewStore`.
    pub fn into_new_store(self) -> StoreFormResult<NewStore> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(StoreFormError::EmptyName);
        }

        let mut new_store = NewStore::new(name);
        if let Some(phone) = sanitize_optional_text(self.phone.as_deref()) {
            new_store = new_store.with_phone(phone);
        }
        if let Some(address) = sanitize_optional_text(self.address.as_deref()) {
            new_store = new_store.with_address(address);
        }

        Ok(new_store)
    }
}

/// JSON payload toggling a store's active flag.
#[derive(Debug, Deserialize)]
pub struct StoreStatusForm {
    pub is_active: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl StoreStatusForm {
    /// Sanitizes the payload; deactivations must carry a reason, while
    /// reactivations always clear the stored one.
    pub fn into_update(self) -> StoreFormResult<UpdateStoreStatus> {
        if self.is_active {
            return Ok(UpdateStoreStatus {
                is_active: true,
                deactivation_reason: None,
            });
        }

        let reason = sanitize_optional_text(self.reason.as_deref())
            .ok_or(StoreFormError::MissingReason)?;

        Ok(UpdateStoreStatus {
            is_active: false,
            deactivation_reason: Some(reason),
        })
    }
}
