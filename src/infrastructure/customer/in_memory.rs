//! In-memory customer repository implementation

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Customer, CustomerRepository, DomainError};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Customer>,
    last_id: i64,
}

/// In-memory implementation of CustomerRepository.
///
/// Ids come from a sequence starting at 1, like a `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryCustomerRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with unsaved customers, assigning ids in order
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let mut table = Table::default();

        for customer in customers {
            table.last_id += 1;
            let id = table.last_id;
            table.rows.insert(id, Customer::with_id(id, customer.name()));
        }

        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, customer: Customer) -> Result<Option<Customer>, DomainError> {
        let mut table = self.table.write().await;

        match customer.id() {
            None => {
                table.last_id += 1;
                let id = table.last_id;
                let saved = Customer::with_id(id, customer.name());
                table.rows.insert(id, saved.clone());
                Ok(Some(saved))
            }
            Some(id) => match table.rows.get_mut(&id) {
                Some(existing) => {
                    *existing = customer.clone();
                    Ok(Some(customer))
                }
                None => Ok(None),
            },
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|c| c.name() == name).cloned())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryCustomerRepository::new();

        let first = repo.save(Customer::new("alice")).await.unwrap().unwrap();
        let second = repo.save(Customer::new("bob")).await.unwrap().unwrap();

        assert_eq!(first.id(), Some(1));
        assert_eq!(second.id(), Some(2));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let repo = InMemoryCustomerRepository::with_customers(vec![
            Customer::new("carol"),
            Customer::new("alice"),
        ]);

        let all = repo.find_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(Customer::name).collect();

        assert_eq!(names, vec!["carol", "alice"]);
        assert_eq!(all[0].id(), Some(1));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = InMemoryCustomerRepository::with_customers(vec![Customer::new("alice")]);

        assert_eq!(
            repo.find_by_id(1).await.unwrap(),
            Some(Customer::with_id(1, "alice"))
        );
        assert_eq!(repo.find_by_id(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_by_name_prefers_lowest_id() {
        let repo = InMemoryCustomerRepository::with_customers(vec![
            Customer::new("alice"),
            Customer::new("bob"),
            Customer::new("alice"),
        ]);

        let found = repo.find_by_name("alice").await.unwrap().unwrap();
        assert_eq!(found.id(), Some(1));
        assert_eq!(repo.find_by_name("zoe").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_existing_and_missing() {
        let repo = InMemoryCustomerRepository::with_customers(vec![Customer::new("alice")]);

        let updated = repo.save(Customer::with_id(1, "alicia")).await.unwrap();
        assert_eq!(updated, Some(Customer::with_id(1, "alicia")));
        assert_eq!(repo.find_by_name("alice").await.unwrap(), None);

        let missing = repo.save(Customer::with_id(42, "nobody")).await.unwrap();
        assert_eq!(missing, None);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
