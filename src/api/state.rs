//! Application state for shared services

use std::sync::Arc;

use crate::domain::CustomerRepository;
use crate::infrastructure::cache::CacheConfig;
use crate::infrastructure::customer::CustomerService;

/// Application state shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub customer_service: Arc<CustomerService>,
}

impl AppState {
    pub fn new(customer_service: Arc<CustomerService>) -> Self {
        Self { customer_service }
    }

    /// Wire a customer service with a fresh cache over the given repository
    pub fn with_repository(repository: Arc<dyn CustomerRepository>, cache: CacheConfig) -> Self {
        Self::new(Arc::new(CustomerService::new(repository, cache)))
    }
}
