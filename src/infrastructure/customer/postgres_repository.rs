//! PostgreSQL customer repository implementation

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::{Customer, CustomerRepository, DomainError};

/// PostgreSQL implementation of CustomerRepository over the `customer` table
#[derive(Debug, Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        let rows = sqlx::query("SELECT id, name FROM customer ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list customers: {}", e)))?;

        rows.iter().map(row_to_customer).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, DomainError> {
        let row = sqlx::query("SELECT id, name FROM customer WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get customer: {}", e)))?;

        row.as_ref().map(row_to_customer).transpose()
    }

    async fn save(&self, customer: Customer) -> Result<Option<Customer>, DomainError> {
        let row = match customer.id() {
            None => {
                sqlx::query("INSERT INTO customer (name) VALUES ($1) RETURNING id, name")
                    .bind(customer.name())
                    .fetch_optional(&self.pool)
                    .await
            }
            Some(id) => {
                sqlx::query("UPDATE customer SET name = $2 WHERE id = $1 RETURNING id, name")
                    .bind(id)
                    .bind(customer.name())
                    .fetch_optional(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to save customer: {}", e)))?;

        row.as_ref().map(row_to_customer).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, DomainError> {
        let row = sqlx::query("SELECT id, name FROM customer WHERE name = $1 ORDER BY id LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to get customer by name: {}", e))
            })?;

        row.as_ref().map(row_to_customer).transpose()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count customers: {}", e)))?;

        Ok(count as u64)
    }
}

fn row_to_customer(row: &PgRow) -> Result<Customer, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::storage(format!("Invalid customer id in database: {}", e)))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| DomainError::storage(format!("Invalid customer name in database: {}", e)))?;

    Ok(Customer::with_id(id, name))
}
