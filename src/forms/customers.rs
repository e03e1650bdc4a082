use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::customer::NewCustomer;
use crate::forms::{sanitize_inline_text, sanitize_optional_text};

/// Maximum length allowed for a customer name.
const NAME_MAX_LEN: u64 = 128;
/// Maximum length allowed for a phone number.
const PHONE_MAX_LEN: u64 = 20;

/// Result type returned by the customer form helpers.
pub type CustomerFormResult<T> = Result<T, CustomerFormError>;

/// Errors that can occur while processing customer forms.
#[derive(Debug, Error)]
pub enum CustomerFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("customer name cannot be empty")]
    EmptyName,
    /// The provided phone is empty after sanitization.
    #[error("customer phone cannot be empty")]
    EmptyPhone,
}

/// JSON payload accepted when creating a customer directly.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(min = 5, max = PHONE_MAX_LEN))]
    pub phone: String,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl CreateCustomerForm {
    /// Validates and sanitizes the payload into a domain `NewCustomer`.
    pub fn into_new_customer(self, store_id: &str) -> CustomerFormResult<NewCustomer> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CustomerFormError::EmptyName);
        }

        let phone = sanitize_inline_text(&self.phone);
        if phone.is_empty() {
            return Err(CustomerFormError::EmptyPhone);
        }

        let mut new_customer = NewCustomer::new(store_id, name, phone);
        if let Some(email) = sanitize_optional_text(self.email.as_deref()) {
            new_customer = new_customer.with_email(email);
        }
        if let Some(address) = sanitize_optional_text(self.address.as_deref()) {
            new_customer = new_customer.with_address(address);
        }

        Ok(new_customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_customer_form_sanitizes_and_converts() {
        let form = CreateCustomerForm {
            name: " Ravi  Kumar ".to_string(),
            phone: " 9000012345 ".to_string(),
            email: Some("Ravi@Example.com".to_string()),
            address: Some("  12 MG Road ".to_string()),
        };

        let new_customer = form
            .into_new_customer("store-1")
            .expect("conversion succeeds");

        assert_eq!(new_customer.store_id, "store-1");
        assert_eq!(new_customer.name, "Ravi Kumar");
        assert_eq!(new_customer.phone, "9000012345");
        assert_eq!(new_customer.email.as_deref(), Some("ravi@example.com"));
        assert_eq!(new_customer.address.as_deref(), Some("12 MG Road"));
    }

    #[test]
    fn create_customer_form_rejects_short_phone() {
        let form = CreateCustomerForm {
            name: "Ravi".to_string(),
            phone: "123".to_string(),
            email: None,
            address: None,
        };

        assert!(matches!(
            form.into_new_customer("store-1"),
            Err(CustomerFormError::Validation(_))
        ));
    }
}
