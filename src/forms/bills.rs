use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::bill::{BillStatus, CustomerDetails, PaymentMethod, PaymentStatus, UpdateBill};
use crate::forms::{sanitize_inline_text, sanitize_optional_text};

/// Maximum length allowed for a customer name.
const NAME_MAX_LEN: u64 = 128;
/// Maximum length allowed for a phone number.
const PHONE_MAX_LEN: u64 = 20;
/// Maximum length allowed for free-text notes.
const NOTES_MAX_LEN: u64 = 2048;

/// Result type returned by the bill form helpers.
pub type BillFormResult<T> = Result<T, BillFormError>;

/// Errors that can occur while processing bill forms.
#[derive(Debug, Error)]
pub enum BillFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The customer name is empty after sanitization.
    #[error("customer name cannot be empty")]
    EmptyName,
    /// The customer phone is empty after sanitization.
    #[error("customer phone cannot be empty")]
    EmptyPhone,
}

/// Customer block submitted with a new bill.
#[derive(Debug, Deserialize, Validate)]
pub struct BillCustomerForm {
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

/// One requested line on a new bill. Quantities are filtered by the service
/// layer, not here, so a mixed payload can still produce a bill.
#[derive(Debug, Deserialize, serde::Serialize)]
pub struct BillLineForm {
    pub category_id: String,
    pub quantity: i32,
}

/// A sanitized line request, priced later by the service layer.
#[derive(Debug, Clone)]
pub struct BillLineRequest {
    pub category_id: String,
    pub quantity: i32,
}

/// Normalized payload produced by the "Create bill" form.
#[derive(Debug)]
pub struct BillRequest {
    pub customer: CustomerDetails,
    pub lines: Vec<BillLineRequest>,
    pub status: BillStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

/// JSON payload accepted when creating a bill.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBillForm {
    #[validate(nested)]
    pub customer: BillCustomerForm,
    #[validate(length(min = 1))]
    pub items: Vec<BillLineForm>,
    #[serde(default)]
    pub status: Option<BillStatus>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[validate(length(max = NOTES_MAX_LEN))]
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateBillForm {
    /// Validates and sanitizes the payload into a normalized bill request.
    pub fn into_bill_request(self) -> BillFormResult<BillRequest> {
        self.validate()?;

        let name = sanitize_inline_text(&self.customer.name);
        if name.is_empty() {
            return Err(BillFormError::EmptyName);
        }

        let phone = sanitize_inline_text(&self.customer.phone);
        if phone.is_empty() {
            return Err(BillFormError::EmptyPhone);
        }

        let customer = CustomerDetails {
            name,
            phone,
            email: sanitize_optional_text(self.customer.email.as_deref())
                .map(|value| value.to_lowercase()),
            address: sanitize_optional_text(self.customer.address.as_deref()),
        };

        let lines = self
            .items
            .into_iter()
            .map(|line| BillLineRequest {
                category_id: line.category_id.trim().to_string(),
                quantity: line.quantity,
            })
            .collect();

        Ok(BillRequest {
            customer,
            lines,
            status: self.status.unwrap_or_default(),
            payment_status: self.payment_status.unwrap_or_default(),
            payment_method: self.payment_method,
            notes: sanitize_optional_text(self.notes.as_deref()),
        })
    }
}

/// JSON payload accepted when patching a bill. Absent fields are left
/// untouched; a blank `notes` string clears the notes.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBillForm {
    #[serde(default)]
    pub status: Option<BillStatus>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[validate(length(max = NOTES_MAX_LEN))]
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdateBillForm {
    /// Validates and sanitizes the payload into a domain `UpdateBill` patch.
    /// `completed_at` handling stays with the service layer.
    pub fn into_update_bill(self) -> BillFormResult<UpdateBill> {
        self.validate()?;

        let mut update = UpdateBill::new();
        if let Some(status) = self.status {
            update = update.status(status);
        }
        if let Some(payment_status) = self.payment_status {
            update = update.payment_status(payment_status);
        }
        if let Some(payment_method) = self.payment_method {
            update = update.payment_method(Some(payment_method));
        }
        if let Some(notes) = self.notes {
            update = update.notes(sanitize_optional_text(Some(notes.as_str())));
        }

        Ok(update)
    }
}
