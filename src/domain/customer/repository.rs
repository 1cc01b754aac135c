//! Customer repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::Customer;
use crate::domain::DomainError;

/// Query facade over the customer table
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers ordered by id
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError>;

    /// Get a customer by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, DomainError>;

    /// Insert a customer without id, or update the name of an existing one.
    ///
    /// Returns the stored row, or `None` when the store yields nothing
    /// (an update of an id that does not exist).
    async fn save(&self, customer: Customer) -> Result<Option<Customer>, DomainError>;

    /// Get a customer by exact name; the lowest id wins when names repeat
    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, DomainError>;

    /// Number of stored customers
    async fn count(&self) -> Result<u64, DomainError>;
}
