use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ordena_core::{ServiceError, ServiceResult};

use crate::record::NewOrder;

/// One open sale as reported by the online-store service.
///
/// The upstream payload is a loose mapping: every field may be absent, and
/// extra fields must survive a round trip through the enrichment endpoint
/// untouched. Absent fields stay absent on re-serialization; unknown fields
/// are carried in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SaleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Upstream sends this as either a number or a numeric string; it is
    /// only coerced when the close-sale callback needs an integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl SaleRecord {
    /// Coerce `sales_id` to an integer for the close-sale callback.
    pub fn sales_id_as_int(&self) -> ServiceResult<i64> {
        match &self.sales_id {
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| ServiceError::internal(format!("invalid sales_id: {n}"))),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| ServiceError::internal(format!("invalid sales_id: {s:?}"))),
            other => Err(ServiceError::internal(format!(
                "invalid sales_id: {other:?}"
            ))),
        }
    }

    /// Build the order to persist, defaulting absent fields the way the
    /// ingestion step always has: empty strings for text, zero for
    /// numerics, the epoch for a missing sale date.
    pub fn into_new_order(self, sales_id: i64) -> NewOrder {
        NewOrder {
            name: self.name.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            supplier: self.supplier.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            sales_id,
            quantity: self.quantity.unwrap_or_default(),
            value: self.value.unwrap_or_default(),
            sale_date: self.sale_date.unwrap_or_default(),
            zip_code: self.zip_code.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            street: self.street.unwrap_or_default(),
            neighborhood: self.neighborhood.unwrap_or_default(),
        }
    }
}
