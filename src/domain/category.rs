use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Catalog seeded for a freshly registered store. Prices are in minor
/// currency units.
pub const DEFAULT_CATALOG: &[(&str, i64, &str)] = &[
    ("Shirt", 1500, "👔"),
    ("Pants", 2000, "👖"),
    ("Saree", 5000, "🥻"),
    ("Suit", 8000, "🤵"),
    ("Kurta", 2500, "👘"),
    ("Dress", 3500, "👗"),
    ("T-Shirt", 1000, "👕"),
    ("Bedsheet", 3000, "🛏️"),
];

/// A billable service line type with its current price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: String,
    /// Store identifier that owns the category.
    pub store_id: String,
    /// Display name, unique within the store.
    pub name: String,
    /// Current unit price in minor currency units. Bills snapshot this value.
    pub price_cents: i64,
    /// Optional emoji or icon shown in the UI.
    pub icon: Option<String>,
    /// Inactive categories cannot be billed but keep their history.
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category for a store.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub store_id: String,
    pub name: String,
    pub price_cents: i64,
    pub icon: Option<String>,
}

impl NewCategory {
    pub fn new(store_id: impl Into<String>, name: impl Into<String>, price_cents: i64) -> Self {
        Self {
            store_id: store_id.into(),
            name: name.into(),
            price_cents,
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Patch data applied when updating an existing category.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub icon: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl UpdateCategory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn icon(mut self, icon: Option<impl Into<String>>) -> Self {
        self.icon = Some(icon.map(|value| value.into()));
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// Query definition used to list categories for a store.
#[derive(Debug, Clone)]
pub struct CategoryListQuery {
    pub store_id: String,
    /// Include deactivated categories in the result.
    pub include_inactive: bool,
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn new(store_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            include_inactive: false,
            pagination: None,
        }
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
