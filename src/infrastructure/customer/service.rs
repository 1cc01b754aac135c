//! Customer service composing the repository with the by-name cache

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Customer, CustomerRepository, DomainError};
use crate::infrastructure::cache::{CacheConfig, ReadThroughCache};

/// Cache name used in logs and metrics
pub const CUSTOMER_CACHE: &str = "customer";

/// Customer service. Lookups by name go through a read-through cache;
/// everything else goes straight to the repository.
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
    cache: ReadThroughCache<String, Customer>,
}

impl std::fmt::Debug for CustomerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerService")
            .field("cache", &self.cache)
            .finish()
    }
}

impl CustomerService {
    /// Create a new customer service with its own cache
    pub fn new(repository: Arc<dyn CustomerRepository>, cache_config: CacheConfig) -> Self {
        Self {
            repository,
            cache: ReadThroughCache::new(CUSTOMER_CACHE, cache_config),
        }
    }

    /// List all customers
    pub async fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        self.repository.find_all().await
    }

    /// Get a customer by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, DomainError> {
        self.repository.find_by_id(id).await
    }

    /// Get a customer by name, served from the cache when possible
    pub async fn find_by_name(&self, name: &str) -> Result<Customer, DomainError> {
        let repository = Arc::clone(&self.repository);
        let lookup = name.to_string();

        self.cache
            .get_or_fetch(name.to_string(), move || async move {
                repository.find_by_name(&lookup).await
            })
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Customer '{}' not found", name)))
    }

    /// Insert or update a customer. Blank names are rejected.
    ///
    /// Updates drop the cached entries of both the previous and the new name,
    /// before the write and again after it, so a lookup racing the write
    /// cannot leave the old row cached.
    pub async fn save(&self, customer: Customer) -> Result<Option<Customer>, DomainError> {
        if customer.name().trim().is_empty() {
            return Err(DomainError::validation("Customer name must not be blank"));
        }

        let previous = match customer.id() {
            Some(id) => self.repository.find_by_id(id).await?,
            None => None,
        };

        let mut stale_names = Vec::new();
        if let Some(previous) = &previous {
            stale_names.push(previous.name().to_string());
            stale_names.push(customer.name().to_string());
        }

        self.invalidate_names(&stale_names).await;
        let saved = self.repository.save(customer).await?;
        self.invalidate_names(&stale_names).await;

        if let Some(saved) = &saved {
            info!(id = ?saved.id(), name = %saved.name(), "Customer saved");
        } else {
            debug!("Save yielded no row");
        }

        Ok(saved)
    }

    async fn invalidate_names(&self, names: &[String]) {
        for name in names {
            self.cache.invalidate(name.as_str()).await;
        }
    }

    /// Insert a customer named after the current timestamp
    pub async fn save_placeholder(&self) -> Result<Option<Customer>, DomainError> {
        self.save(Customer::placeholder()).await
    }

    /// Number of rows in the store
    pub async fn count(&self) -> Result<u64, DomainError> {
        self.repository.count().await
    }

    /// Number of cached lookups
    pub fn cached_entries(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn cache(&self) -> &ReadThroughCache<String, Customer> {
        &self.cache
    }
}
