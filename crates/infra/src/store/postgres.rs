//! Postgres-backed order store.
//!
//! Runtime (non-macro) sqlx queries against a single `orders` table. Every
//! method is one statement; `complete_pending` is the conditional UPDATE
//! that makes invoice completion atomic.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use ordena_orders::{InvoiceStatus, NewOrder, OrderRecord};

use super::{OrderStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    order_id        BIGSERIAL PRIMARY KEY,
    name            VARCHAR(30)  NOT NULL DEFAULT '',
    price           DOUBLE PRECISION NOT NULL DEFAULT 0,
    supplier        VARCHAR(100) NOT NULL DEFAULT '',
    category        VARCHAR(20)  NOT NULL DEFAULT '',
    description     VARCHAR(500) NOT NULL DEFAULT '',
    sales_id        BIGINT       NOT NULL DEFAULT 0,
    quantity        BIGINT       NOT NULL DEFAULT 0,
    value           DOUBLE PRECISION NOT NULL DEFAULT 0,
    sale_date       TIMESTAMP    NOT NULL DEFAULT 'epoch',
    zip_code        VARCHAR(15)  NOT NULL DEFAULT '',
    country         VARCHAR(50)  NOT NULL DEFAULT '',
    city            VARCHAR(50)  NOT NULL DEFAULT '',
    state           VARCHAR(50)  NOT NULL DEFAULT '',
    street          VARCHAR(50)  NOT NULL DEFAULT '',
    neighborhood    VARCHAR(20)  NOT NULL DEFAULT '',
    invoice_status  VARCHAR(10)  NOT NULL DEFAULT 'Pending'
)
"#;

const COLUMNS: &str = "order_id, name, price, supplier, category, description, \
     sales_id, quantity, value, sale_date, zip_code, country, city, state, \
     street, neighborhood, invoice_status";

pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    /// Connect and make sure the `orders` table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await.map_err(backend)?;
        sqlx::query(SCHEMA).execute(&pool).await.map_err(backend)?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn row_to_record(row: &PgRow) -> Result<OrderRecord, StoreError> {
    let status: String = row.try_get("invoice_status").map_err(backend)?;
    let invoice_status = InvoiceStatus::parse(&status).ok_or_else(|| {
        StoreError::Backend(format!("unrecognized invoice_status in storage: {status:?}"))
    })?;

    Ok(OrderRecord {
        order_id: row.try_get("order_id").map_err(backend)?,
        name: row.try_get("name").map_err(backend)?,
        price: row.try_get("price").map_err(backend)?,
        supplier: row.try_get("supplier").map_err(backend)?,
        category: row.try_get("category").map_err(backend)?,
        description: row.try_get("description").map_err(backend)?,
        sales_id: row.try_get("sales_id").map_err(backend)?,
        quantity: row.try_get("quantity").map_err(backend)?,
        value: row.try_get("value").map_err(backend)?,
        sale_date: row.try_get("sale_date").map_err(backend)?,
        zip_code: row.try_get("zip_code").map_err(backend)?,
        country: row.try_get("country").map_err(backend)?,
        city: row.try_get("city").map_err(backend)?,
        state: row.try_get("state").map_err(backend)?,
        street: row.try_get("street").map_err(backend)?,
        neighborhood: row.try_get("neighborhood").map_err(backend)?,
        invoice_status,
    })
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<OrderRecord, StoreError> {
        let row = sqlx::query(
            "INSERT INTO orders (name, price, supplier, category, description, \
             sales_id, quantity, value, sale_date, zip_code, country, city, \
             state, street, neighborhood) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING order_id",
        )
        .bind(&order.name)
        .bind(order.price)
        .bind(&order.supplier)
        .bind(&order.category)
        .bind(&order.description)
        .bind(order.sales_id)
        .bind(order.quantity)
        .bind(order.value)
        .bind(order.sale_date)
        .bind(&order.zip_code)
        .bind(&order.country)
        .bind(&order.city)
        .bind(&order.state)
        .bind(&order.street)
        .bind(&order.neighborhood)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        let order_id: i64 = row.try_get("order_id").map_err(backend)?;
        Ok(OrderRecord::from_new(order_id, order))
    }

    async fn list_by_status(&self, status: InvoiceStatus) -> Result<Vec<OrderRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM orders WHERE invoice_status = $1 ORDER BY order_id"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.iter().map(row_to_record).collect()
    }

    async fn status_of(&self, order_id: i64) -> Result<Option<InvoiceStatus>, StoreError> {
        let row = sqlx::query("SELECT invoice_status FROM orders WHERE order_id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        match row {
            None => Ok(None),
            Some(row) => {
                let status: String = row.try_get("invoice_status").map_err(backend)?;
                InvoiceStatus::parse(&status).map(Some).ok_or_else(|| {
                    StoreError::Backend(format!(
                        "unrecognized invoice_status in storage: {status:?}"
                    ))
                })
            }
        }
    }

    async fn complete_pending(&self, order_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE orders SET invoice_status = 'Completed' \
             WHERE order_id = $1 AND invoice_status = 'Pending'",
        )
        .bind(order_id)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(result.rows_affected() == 1)
    }
}
