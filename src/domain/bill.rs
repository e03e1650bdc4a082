use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::pagination::Pagination;

/// Lifecycle states of a bill.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatus {
    /// Items received, work not finished yet.
    Pending,
    /// Work finished, waiting for the customer to collect.
    Ready,
    /// Collected and closed.
    Completed,
    /// Cancelled, excluded from revenue.
    Cancelled,
}

impl Default for BillStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl From<BillStatus> for &'static str {
    fn from(value: BillStatus) -> Self {
        match value {
            BillStatus::Pending => "PENDING",
            BillStatus::Ready => "READY",
            BillStatus::Completed => "COMPLETED",
            BillStatus::Cancelled => "CANCELLED",
        }
    }
}

impl From<&str> for BillStatus {
    fn from(value: &str) -> Self {
        match value {
            "READY" => Self::Ready,
            "COMPLETED" => Self::Completed,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

/// Payment states of a bill.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl From<PaymentStatus> for &'static str {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        match value {
            "PAID" => Self::Paid,
            _ => Self::Pending,
        }
    }
}

/// How a bill was (or will be) paid.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Online,
    Upi,
    Other,
}

impl PaymentMethod {
    /// True for methods settled through a UPI-style payment link.
    pub fn is_digital(&self) -> bool {
        matches!(self, Self::Online | Self::Upi)
    }
}

impl From<PaymentMethod> for &'static str {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Online => "ONLINE",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Other => "OTHER",
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        match value {
            "CASH" => Self::Cash,
            "ONLINE" => Self::Online,
            "UPI" => Self::Upi,
            _ => Self::Other,
        }
    }
}

/// A priced line on a bill. The price is a snapshot taken at creation time
/// and never changes, even if the category is re-priced later.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BillItem {
    /// Unique identifier of the line.
    pub id: String,
    /// Category the line was priced from.
    pub category_id: String,
    /// Category name at read time, joined for display and messages.
    pub category_name: String,
    /// Number of pieces, always >= 1.
    pub quantity: i32,
    /// Unit price snapshot in minor currency units.
    pub price_cents: i64,
    /// price_cents * quantity.
    pub subtotal_cents: i64,
}

/// Domain representation of a bill with its customer and lines.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Bill {
    /// Unique identifier of the bill.
    pub id: String,
    /// Owning store identifier.
    pub store_id: String,
    /// Human-facing sequence, `BILL-YYYYMMDD-NNN`, unique per store.
    pub bill_number: String,
    /// Customer the bill was issued to.
    pub customer: Customer,
    /// Current lifecycle status.
    pub status: BillStatus,
    /// Current payment status.
    pub payment_status: PaymentStatus,
    /// Declared payment method, if any.
    pub payment_method: Option<PaymentMethod>,
    /// Operator notes.
    pub notes: Option<String>,
    /// Sum of line subtotals in minor currency units.
    pub total_cents: i64,
    /// Set when the status first transitions to COMPLETED.
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Lines created atomically with the bill, immutable afterwards.
    pub items: Vec<BillItem>,
}

/// Customer details supplied with a bill; used to find or lazily create the
/// customer record by `(store_id, phone)`.
#[derive(Debug, Clone)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Line payload for a new bill, priced by the service layer.
#[derive(Debug, Clone)]
pub struct NewBillItem {
    pub category_id: String,
    pub quantity: i32,
    /// Unit price snapshot in minor currency units.
    pub price_cents: i64,
    pub subtotal_cents: i64,
}

impl NewBillItem {
    /// Build a line payload, deriving the subtotal from price and quantity.
    pub fn new(category_id: impl Into<String>, quantity: i32, price_cents: i64) -> Self {
        Self {
            category_id: category_id.into(),
            quantity,
            price_cents,
            subtotal_cents: price_cents * i64::from(quantity),
        }
    }
}

/// Payload required to insert a new bill with its lines.
#[derive(Debug, Clone)]
pub struct NewBill {
    /// Owning store identifier.
    pub store_id: String,
    /// Customer to resolve or create inside the same transaction.
    pub customer: CustomerDetails,
    /// Priced lines, at least one.
    pub items: Vec<NewBillItem>,
    pub status: BillStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    /// Sum of line subtotals.
    pub total_cents: i64,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewBill {
    /// Build a new bill payload; the total is derived from the lines.
    pub fn new(
        store_id: impl Into<String>,
        customer: CustomerDetails,
        items: Vec<NewBillItem>,
    ) -> Self {
        let total_cents = items.iter().map(|item| item.subtotal_cents).sum();
        Self {
            store_id: store_id.into(),
            customer,
            items,
            status: BillStatus::default(),
            payment_status: PaymentStatus::default(),
            payment_method: None,
            notes: None,
            total_cents,
            updated_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn with_status(mut self, status: BillStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    pub fn with_payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = Some(payment_method);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Patch data applied when updating an existing bill. Lines and totals are
/// immutable after creation and therefore absent here.
#[derive(Debug, Clone, Default)]
pub struct UpdateBill {
    pub status: Option<BillStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<Option<PaymentMethod>>,
    pub notes: Option<Option<String>>,
    pub completed_at: Option<Option<NaiveDateTime>>,
}

impl UpdateBill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: BillStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    pub fn payment_method(mut self, payment_method: Option<PaymentMethod>) -> Self {
        self.payment_method = Some(payment_method);
        self
    }

    pub fn notes(mut self, notes: Option<impl Into<String>>) -> Self {
        self.notes = Some(notes.map(|value| value.into()));
        self
    }

    pub fn completed_at(mut self, completed_at: Option<NaiveDateTime>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }
}

/// Query definition used to list bills.
#[derive(Debug, Clone, Default)]
pub struct BillListQuery {
    /// Owning store; `None` lists across all stores (super-admin view).
    pub store_id: Option<String>,
    pub status: Option<BillStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub customer_id: Option<String>,
    /// Matches the bill number, customer name or customer phone.
    pub search: Option<String>,
    pub created_after: Option<NaiveDateTime>,
    pub created_before: Option<NaiveDateTime>,
    pub pagination: Option<Pagination>,
}

impl BillListQuery {
    pub fn new(store_id: impl Into<String>) -> Self {
        Self {
            store_id: Some(store_id.into()),
            ..Self::default()
        }
    }

    pub fn all_stores() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: BillStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn created_between(
        mut self,
        after: Option<NaiveDateTime>,
        before: Option<NaiveDateTime>,
    ) -> Self {
        self.created_after = after;
        self.created_before = before;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only rollups over bills for one store or the whole platform.
#[derive(Debug, Serialize, Clone)]
pub struct DashboardStats {
    pub total_bills: i64,
    pub pending_bills: i64,
    pub completed_bills: i64,
    /// Revenue from COMPLETED bills created since local midnight.
    pub today_revenue_cents: i64,
    /// Revenue from COMPLETED bills created in the trailing 7 days.
    pub weekly_revenue_cents: i64,
    /// Revenue from COMPLETED bills created in the trailing 30 days.
    pub monthly_revenue_cents: i64,
    /// The five most recently created bills.
    pub recent_bills: Vec<Bill>,
}

/// Prefix of all bill numbers issued on `date`, e.g. `BILL-20260830`.
pub fn bill_number_prefix(date: NaiveDate) -> String {
    format!("BILL-{}", date.format("%Y%m%d"))
}

/// Parse the numeric suffix of a bill number, `BILL-20260830-007` -> 7.
pub fn bill_number_suffix(bill_number: &str) -> Option<u32> {
    bill_number.rsplit('-').next()?.parse().ok()
}

/// Render the next bill number for a prefix, zero-padded to three digits.
pub fn format_bill_number(prefix: &str, sequence: u32) -> String {
    format!("{prefix}-{sequence:03}")
}

/// Render minor currency units as a decimal amount, 4500 -> "45.00".
pub fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}
