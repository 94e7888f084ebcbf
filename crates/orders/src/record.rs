use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Invoice status lifecycle. Monotonic: `Pending` → `Completed`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Completed,
}

impl InvoiceStatus {
    /// Stored form, matching the `invoice_status` column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A not-yet-persisted order, produced by the ingestion step from an
/// upstream sale. The store assigns `order_id` and the initial status.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub name: String,
    pub price: f64,
    pub supplier: String,
    pub category: String,
    pub description: String,
    pub sales_id: i64,
    pub quantity: i64,
    pub value: f64,
    pub sale_date: NaiveDateTime,
    pub zip_code: String,
    pub country: String,
    pub city: String,
    pub state: String,
    pub street: String,
    pub neighborhood: String,
}

/// Persisted order row: one fulfilled sale with its shipping address and
/// invoice status. Never deleted; only `invoice_status` is ever updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: i64,
    pub name: String,
    pub price: f64,
    pub supplier: String,
    pub category: String,
    pub description: String,
    pub sales_id: i64,
    pub quantity: i64,
    pub value: f64,
    pub sale_date: NaiveDateTime,
    pub zip_code: String,
    pub country: String,
    pub city: String,
    pub state: String,
    pub street: String,
    pub neighborhood: String,
    pub invoice_status: InvoiceStatus,
}

impl OrderRecord {
    /// Materialize a new order as the store would persist it.
    pub fn from_new(order_id: i64, new: NewOrder) -> Self {
        Self {
            order_id,
            name: new.name,
            price: new.price,
            supplier: new.supplier,
            category: new.category,
            description: new.description,
            sales_id: new.sales_id,
            quantity: new.quantity,
            value: new.value,
            sale_date: new.sale_date,
            zip_code: new.zip_code,
            country: new.country,
            city: new.city,
            state: new.state,
            street: new.street,
            neighborhood: new.neighborhood,
            invoice_status: InvoiceStatus::Pending,
        }
    }
}
