//! Order lookups

use std::sync::Arc;

use async_trait::async_trait;
use shared::{Customer, Order};
use sqlx::PgPool;

use crate::error::AppResult;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Orders asking for exactly this model and version, with customer emails
    async fn find_by_robot(&self, model: &str, version: &str) -> AppResult<Vec<Order>>;
}

#[async_trait]
impl<T: OrderRepository + ?Sized> OrderRepository for Arc<T> {
    async fn find_by_robot(&self, model: &str, version: &str) -> AppResult<Vec<Order>> {
        (**self).find_by_robot(model, version).await
    }
}

/// PostgreSQL order repository
#[derive(Clone)]
pub struct PgOrderRepository {
    db: PgPool,
}

impl PgOrderRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_by_robot(&self, model: &str, version: &str) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT o.id, o.customer_id, c.email AS customer_email, o.model, o.version
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            WHERE o.model = $1 AND o.version = $2
            ORDER BY o.created_at
            "#,
        )
        .bind(model)
        .bind(version)
        .fetch_all(&self.db)
        .await?;

        Ok(orders.into_iter().map(Order::from).collect())
    }
}

/// Database row for an order joined with its customer
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: uuid::Uuid,
    customer_id: uuid::Uuid,
    customer_email: String,
    model: String,
    version: String,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            customer: Customer {
                id: row.customer_id,
                email: row.customer_email,
            },
            model: row.model,
            version: row.version,
        }
    }
}
