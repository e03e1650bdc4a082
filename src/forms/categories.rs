use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::{sanitize_inline_text, sanitize_optional_text};

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: u64 = 128;
/// Maximum length allowed for a category icon.
const ICON_MAX_LEN: u64 = 16;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("category name cannot be empty")]
    EmptyName,
    /// No fields were supplied on an update.
    #[error("no category fields to update")]
    EmptyUpdate,
}

/// JSON payload accepted when creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    /// Unit price in minor currency units.
    #[validate(range(min = 1))]
    pub price_cents: i64,
    #[validate(length(max = ICON_MAX_LEN))]
    #[serde(default)]
    pub icon: Option<String>,
}

impl CreateCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self, store_id: &str) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        let mut new_category = NewCategory::new(store_id, name, self.price_cents);
        if let Some(icon) = sanitize_optional_text(self.icon.as_deref()) {
            new_category = new_category.with_icon(icon);
        }

        Ok(new_category)
    }
}

/// JSON payload accepted when patching a category. Absent fields are left
/// untouched; a blank `icon` string clears the icon.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(length(max = NAME_MAX_LEN))]
    #[serde(default)]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[validate(length(max = ICON_MAX_LEN))]
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl UpdateCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        self.validate()?;

        let mut update = UpdateCategory::new();
        let mut touched = false;

        if let Some(name) = self.name {
            let name = sanitize_inline_text(&name);
            if name.is_empty() {
                return Err(CategoryFormError::EmptyName);
            }
            update = update.name(name);
            touched = true;
        }
        if let Some(price_cents) = self.price_cents {
            update = update.price_cents(price_cents);
            touched = true;
        }
        if let Some(icon) = self.icon {
            update = update.icon(sanitize_optional_text(Some(icon.as_str())));
            touched = true;
        }
        if let Some(is_active) = self.is_active {
            update = update.is_active(is_active);
            touched = true;
        }

        if !touched {
            return Err(CategoryFormError::EmptyUpdate);
        }

        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_category_form_sanitizes_and_converts() {
        let form = CreateCategoryForm {
            name: "  Silk  Saree ".to_string(),
            price_cents: 7500,
            icon: Some(" 🥻 ".to_string()),
        };

        let new_category = form
            .into_new_category("store-1")
            .expect("conversion succeeds");

        assert_eq!(new_category.store_id, "store-1");
        assert_eq!(new_category.name, "Silk Saree");
        assert_eq!(new_category.price_cents, 7500);
        assert_eq!(new_category.icon.as_deref(), Some("🥻"));
    }

    #[test]
    fn create_category_form_rejects_zero_price() {
        let form = CreateCategoryForm {
            name: "Shirt".to_string(),
            price_cents: 0,
            icon: None,
        };

        assert!(matches!(
            form.into_new_category("store-1"),
            Err(CategoryFormError::Validation(_))
        ));
    }

    #[test]
    fn update_category_form_requires_some_field() {
        let form = UpdateCategoryForm {
            name: None,
            price_cents: None,
            icon: None,
            is_active: None,
        };

        assert!(matches!(
            form.into_update_category(),
            Err(CategoryFormError::EmptyUpdate)
        ));
    }

    #[test]
    fn update_category_form_blank_icon_clears() {
        let form = UpdateCategoryForm {
            name: None,
            price_cents: Some(2000),
            icon: Some("  ".to_string()),
            is_active: Some(false),
        };

        let update = form.into_update_category().expect("conversion succeeds");

        assert_eq!(update.price_cents, Some(2000));
        assert_eq!(update.icon, Some(None));
        assert_eq!(update.is_active, Some(false));
        assert!(update.name.is_none());
    }
}
