use serde::Deserialize;

use ordena_orders::OrderRecord;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CompleteOrderForm {
    pub order_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ZipCodeQuery {
    pub zip_code: String,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Projection of an order's business fields: everything except the internal
/// identifier and the invoice status.
pub fn order_to_json(record: &OrderRecord) -> serde_json::Value {
    serde_json::json!({
        "name": record.name,
        "price": record.price,
        "supplier": record.supplier,
        "category": record.category,
        "description": record.description,
        "sales_id": record.sales_id,
        "quantity": record.quantity,
        "value": record.value,
        "sale_date": record.sale_date,
        "zip_code": record.zip_code,
        "country": record.country,
        "city": record.city,
        "state": record.state,
        "street": record.street,
        "neighborhood": record.neighborhood,
    })
}

/// Pending-invoice entry: the identifier plus the full projection.
pub fn pending_order_to_json(record: &OrderRecord) -> serde_json::Value {
    let mut entry = serde_json::json!({ "order_id": record.order_id });
    if let (Some(map), serde_json::Value::Object(fields)) =
        (entry.as_object_mut(), order_to_json(record))
    {
        map.extend(fields);
    }
    entry
}
