//! Postgres-backed order repository.
//!
//! One row per order, keyed by the order id. Line items live in a JSONB column
//! in their snapshot shape. The derived total is written alongside for
//! reporting queries but is never read back: totals are always recomputed
//! from the lines.
//!
//! ## Error Mapping
//!
//! | Failure | RepositoryError |
//! |---------|-----------------|
//! | Any SQLx error (connection, pool closed, constraint, ...) | `Storage` |
//! | A row that no longer forms a valid `Order` | `CorruptRecord` |

use std::sync::Arc;

use chrono::Utc;
use sqlx::{postgres::PgRow, types::Json, PgPool, Row};
use tracing::{instrument, Span};

use ordering_core::{AggregateRoot, Id};
use ordering_orders::{
    DiscountCode, Order, OrderLineSnapshot, OrderRepository, OrderSnapshot, OrderStatus,
    RepositoryError,
};

const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id               TEXT PRIMARY KEY,
    seq              BIGSERIAL NOT NULL,
    items            JSONB NOT NULL,
    shipping_address TEXT NOT NULL,
    status           TEXT NOT NULL,
    discount_code    TEXT NULL,
    total            DOUBLE PRECISION NOT NULL DEFAULT 0,
    updated_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Postgres-backed order repository.
///
/// Uses the SQLx connection pool, which is `Send + Sync` and can be shared
/// across tasks.
#[derive(Debug, Clone)]
pub struct PostgresOrderRepository {
    pool: Arc<PgPool>,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect to `database_url` and make sure the `orders` table exists.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let repo = Self::new(pool);
        repo.ensure_schema().await?;
        Ok(repo)
    }

    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_ORDERS_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl OrderRepository for PostgresOrderRepository {
    #[instrument(skip(self), fields(order_count), err)]
    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, items, shipping_address, status, discount_code
            FROM orders
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        Span::current().record("order_count", rows.len());
        rows.iter().map(order_from_row).collect()
    }

    #[instrument(skip(self), fields(order_id = %id), err)]
    async fn find_by_id(&self, id: &Id) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, items, shipping_address, status, discount_code
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(order_from_row).transpose()
    }

    #[instrument(skip(self, order), fields(order_id = %order.id()), err)]
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let snapshot = order.to_snapshot();
        let total = order
            .total()
            .map_err(|e| RepositoryError::Storage(format!("cannot compute total: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, items, shipping_address, status, discount_code, total, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id)
            DO UPDATE SET
                items = EXCLUDED.items,
                shipping_address = EXCLUDED.shipping_address,
                status = EXCLUDED.status,
                discount_code = EXCLUDED.discount_code,
                total = EXCLUDED.total,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&snapshot.id)
        .bind(Json(&snapshot.items))
        .bind(&snapshot.shipping_address)
        .bind(snapshot.status.as_str())
        .bind(snapshot.discount_code.as_ref().map(DiscountCode::as_str))
        .bind(total.value())
        .bind(Utc::now())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(order_id = %id), err)]
    async fn delete(&self, id: &Id) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        Ok(())
    }
}

fn order_from_row(row: &PgRow) -> Result<Order, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| map_sqlx_error("read_row", e))?;
    let corrupt = |reason: String| RepositoryError::CorruptRecord {
        id: id.clone(),
        reason,
    };

    let Json(items): Json<Vec<OrderLineSnapshot>> =
        row.try_get("items").map_err(|e| corrupt(e.to_string()))?;
    let shipping_address: String = row
        .try_get("shipping_address")
        .map_err(|e| corrupt(e.to_string()))?;
    let status: String = row.try_get("status").map_err(|e| corrupt(e.to_string()))?;
    let discount_code: Option<String> = row
        .try_get("discount_code")
        .map_err(|e| corrupt(e.to_string()))?;

    let status = status
        .parse::<OrderStatus>()
        .map_err(|e| corrupt(e.to_string()))?;

    let snapshot = OrderSnapshot {
        id: id.clone(),
        items,
        shipping_address,
        status,
        discount_code: discount_code.map(DiscountCode::parse),
    };

    Order::from_snapshot(snapshot).map_err(|e| corrupt(e.to_string()))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => RepositoryError::Storage(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            RepositoryError::Storage(format!("connection pool closed in {}", operation))
        }
        _ => RepositoryError::Storage(format!("sqlx error in {}: {}", operation, err)),
    }
}
